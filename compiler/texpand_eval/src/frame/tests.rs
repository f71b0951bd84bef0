use super::*;
use pretty_assertions::assert_eq;
use texpand_ir::Block;

fn words(list: &[&str]) -> Rc<[StatementNode]> {
    list.iter().map(|w| StatementNode::word(w)).collect()
}

fn no_params() -> Rc<Scope> {
    Scope::root()
}

#[test]
fn test_read_walks_root_then_sentinel() {
    let mut stack = FrameStack::new(words(&["a", "b"]), None);

    assert_eq!(stack.read().unwrap(), Some(StatementNode::word("a")));
    assert_eq!(stack.read().unwrap(), Some(StatementNode::word("b")));
    assert!(!stack.end_of_input());
    assert_eq!(stack.read().unwrap(), Some(StatementNode::SentinelEnd));
    assert!(stack.end_of_input());
    assert_eq!(stack.read().unwrap(), None);
    assert_eq!(stack.peek(), None);
}

#[test]
fn test_consume_is_invisible_until_advance() {
    let mut stack = FrameStack::new(words(&["a", "b"]), None);

    stack.consume().unwrap();
    assert_eq!(stack.peek(), Some(StatementNode::word("a")));
    stack.advance();
    assert_eq!(stack.peek(), Some(StatementNode::word("b")));
}

#[test]
fn test_pushed_frame_runs_before_remainder() {
    let mut stack = FrameStack::new(words(&["cmd", "after"]), None);

    // Executing `cmd`: consumed but not yet committed when the body is pushed.
    assert_eq!(stack.peek(), Some(StatementNode::word("cmd")));
    stack.consume().unwrap();
    stack.push(words(&["body"]), no_params()).unwrap();
    stack.advance();

    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.read().unwrap(), Some(StatementNode::word("body")));
    // Reading the sentinel retires the body frame and re-commits the root.
    assert_eq!(stack.read().unwrap(), Some(StatementNode::SentinelEnd));
    assert_eq!(stack.depth(), 1);
    assert_eq!(stack.read().unwrap(), Some(StatementNode::word("after")));
}

#[test]
fn test_advance_retires_several_frames_at_once() {
    let mut stack = FrameStack::new(words(&["x", "tail"]), None);
    stack.consume().unwrap();
    stack.push(words(&["y"]), no_params()).unwrap();
    stack.advance();
    stack.consume().unwrap();
    stack.push(Rc::from(Vec::new()), no_params()).unwrap();
    stack.advance();
    assert_eq!(stack.depth(), 3);

    // Force both inner frames onto their sentinels, then commit.
    stack.frames[1].consumed = 2;
    stack.frames[2].consumed = 1;
    stack.advance();

    assert_eq!(stack.depth(), 1);
    assert_eq!(stack.peek(), Some(StatementNode::word("tail")));
}

#[test]
fn test_peek_looks_past_executing_node_of_outer_frame() {
    let mut stack = FrameStack::new(words(&["cmd", "next"]), None);
    stack.consume().unwrap();
    stack.push(words(&["inner"]), no_params()).unwrap();

    // Inner frame committed past its end but not yet retired.
    stack.frames[1].cursor = stack.frames[1].len();

    // The root's cursor still sits on `cmd`; offset 1 yields the node after it.
    assert_eq!(stack.peek(), Some(StatementNode::word("next")));
}

#[test]
fn test_pending_and_skip() {
    let mut stack = FrameStack::new(words(&["a", "b", "c"]), None);
    stack.consume().unwrap();
    stack.advance();

    assert_eq!(stack.pending(), &*words(&["b", "c"]));
    stack.skip(2).unwrap();
    assert!(stack.pending().is_empty());
    assert_eq!(stack.peek(), Some(StatementNode::SentinelEnd));
}

#[test]
fn test_frame_limit() {
    let mut stack = FrameStack::new(words(&["a"]), Some(2));
    stack.push(words(&["b"]), no_params()).unwrap();
    let err = stack.push(words(&["c"]), no_params()).unwrap_err();
    assert_eq!(err, frame_limit_exceeded(2));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn test_active_scope_follows_top_frame() {
    let args: Parameters = Rc::from(vec![Block::new(vec![StatementNode::word("arg")])]);
    let mut stack = FrameStack::new(words(&["a"]), None);
    let root = stack.active_scope();
    assert!(root.arguments().is_empty());

    let scope = Scope::bind(Rc::clone(&args), &root);
    stack.push(words(&["b"]), Rc::clone(&scope)).unwrap();
    assert!(Rc::ptr_eq(&stack.active_scope(), &scope));
    assert!(Rc::ptr_eq(stack.active_scope().arguments(), &args));
    assert!(Rc::ptr_eq(&stack.active_scope().caller(), &root));
    assert_eq!(stack.frames.last().map(|frame| frame.cursor), Some(0));
}

#[test]
fn test_root_scope_caller_is_empty() {
    let root = Scope::root();
    assert!(root.caller().arguments().is_empty());
}

#[test]
fn test_underflow_is_internal_error() {
    let mut stack = FrameStack::new(Rc::from(Vec::new()), None);
    assert_eq!(stack.read().unwrap(), Some(StatementNode::SentinelEnd));
    assert!(stack.end_of_input());

    let err = stack.consume().unwrap_err();
    assert!(err.is_internal());
    assert!(stack.skip(1).unwrap_err().is_internal());
}
