use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_as_text_flattens_blocks_without_braces() {
    let node = StatementNode::block(vec![
        StatementNode::word("foo"),
        StatementNode::Whitespace,
        StatementNode::number("12"),
        StatementNode::punctuation(","),
        StatementNode::block(vec![StatementNode::word("bar")]),
    ]);
    assert_eq!(node.as_text(), "foo 12,bar");
}

#[test]
fn test_as_text_command_and_parameter() {
    let block = Block::new(vec![
        StatementNode::command_with_optional("foo", vec![Block::new(vec![StatementNode::number("1")])]),
        StatementNode::parameter(2),
        StatementNode::LineBreak,
        StatementNode::MathToggle,
    ]);
    assert_eq!(block.as_text(), "\\foo#2\n$");
}

#[test]
fn test_as_text_ignores_renderer_nodes() {
    let block = Block::new(vec![
        StatementNode::echo("<div>"),
        StatementNode::callback(|| {}),
        StatementNode::SentinelEnd,
    ]);
    assert_eq!(block.as_text(), "");
}

#[test]
fn test_single_word() {
    let name = Block::new(vec![StatementNode::word("itemize")]);
    assert_eq!(name.single_word().map(|w| &**w), Some("itemize"));

    let two = Block::new(vec![StatementNode::word("a"), StatementNode::word("b")]);
    assert_eq!(two.single_word(), None);

    let number = Block::new(vec![StatementNode::number("1")]);
    assert_eq!(number.single_word(), None);

    assert_eq!(Block::empty().single_word(), None);
}

#[test]
fn test_block_clone_shares_statements() {
    let block = Block::new(vec![StatementNode::word("x")]);
    let copy = block.clone();
    assert!(Rc::ptr_eq(&block.shared(), &copy.shared()));
}

#[test]
fn test_brackets() {
    assert!(StatementNode::punctuation("[").is_open_bracket());
    assert!(StatementNode::punctuation("]").is_close_bracket());
    assert!(!StatementNode::punctuation("(").is_open_bracket());
    assert!(!StatementNode::word("[").is_open_bracket());
}

#[test]
fn test_parameter_block() {
    let body = Block::parameter(1);
    assert_eq!(body.len(), 1);
    assert_eq!(body.statements()[0], StatementNode::ParameterReference(1));
}
