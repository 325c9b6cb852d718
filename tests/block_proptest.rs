//! Property-based tests for block serialization
//!
//! Any sequence of valid blocks must come back from the package as the same
//! number of body paragraphs, in order, with the same resolved formatting.

use docwright::ooxml::docx::format::{Alignment, RgbColor};
use docwright::ooxml::docx::writer::{
    Block, BlockKind, DocumentTree, HeadingOptions, Run, Serializer, StyleRegistry,
};
use docwright::DocxReader;
use proptest::prelude::*;

/// Run text without carriage returns, which read back as line feeds
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,24}",
        "[a-zA-Z0-9 .,:;&<>\"'°é-]{1,24}",
        "[a-z]{1,8}[\t\n][a-z]{1,8}",
    ]
}

fn alignment_strategy() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::Start),
        Just(Alignment::Center),
        Just(Alignment::End),
        Just(Alignment::Justify),
    ]
}

fn run_strategy() -> impl Strategy<Value = Run> {
    (
        text_strategy(),
        proptest::option::of(any::<bool>()),
        proptest::option::of(1u32..=400),
        proptest::option::of(any::<(u8, u8, u8)>()),
        proptest::option::of(prop_oneof![Just("Arial"), Just("Cambria"), Just("Courier New")]),
    )
        .prop_map(|(text, bold, half_points, color, font)| {
            let mut run = Run::new(text);
            if let Some(bold) = bold {
                run = run.bold(bold);
            }
            if let Some(half_points) = half_points {
                run = run.size(f64::from(half_points) / 2.0);
            }
            if let Some((r, g, b)) = color {
                run = run.color(RgbColor(r, g, b));
            }
            if let Some(font) = font {
                run = run.font(font);
            }
            run
        })
}

fn block_strategy() -> impl Strategy<Value = Block> {
    let runs = || proptest::collection::vec(run_strategy(), 1..4);
    prop_oneof![
        (1i32..=9, runs(), alignment_strategy())
            .prop_map(|(level, runs, alignment)| Block::heading(level, runs).with_alignment(alignment)),
        (runs(), alignment_strategy())
            .prop_map(|(runs, alignment)| Block::paragraph(runs).with_alignment(alignment)),
        (runs(), alignment_strategy())
            .prop_map(|(runs, alignment)| Block::list_item(runs).with_alignment(alignment)),
        Just(Block::page_break()),
    ]
}

/// One call on the `DocumentTree` builder API
#[derive(Debug, Clone)]
enum BuildOp {
    Heading(String, i32, HeadingOptions),
    Paragraph(Vec<Run>, Alignment),
    ListItem(Run, Vec<Run>),
    PageBreak,
}

fn heading_options_strategy() -> impl Strategy<Value = HeadingOptions> {
    (
        alignment_strategy(),
        proptest::option::of(any::<bool>()),
        proptest::option::of(1u32..=200),
        proptest::option::of(any::<(u8, u8, u8)>()),
    )
        .prop_map(|(alignment, bold, half_points, color)| {
            let mut options = HeadingOptions::new().with_alignment(alignment);
            if let Some(bold) = bold {
                options = options.with_bold(bold);
            }
            if let Some(half_points) = half_points {
                options = options.with_size(f64::from(half_points) / 2.0);
            }
            if let Some((r, g, b)) = color {
                options = options.with_color(RgbColor(r, g, b));
            }
            options
        })
}

fn build_op_strategy() -> impl Strategy<Value = BuildOp> {
    prop_oneof![
        (text_strategy(), 1i32..=9, heading_options_strategy())
            .prop_map(|(text, level, options)| BuildOp::Heading(text, level, options)),
        (proptest::collection::vec(run_strategy(), 1..4), alignment_strategy())
            .prop_map(|(runs, alignment)| BuildOp::Paragraph(runs, alignment)),
        (run_strategy(), proptest::collection::vec(run_strategy(), 0..3))
            .prop_map(|(lead, trailing)| BuildOp::ListItem(lead, trailing)),
        Just(BuildOp::PageBreak),
    ]
}

fn expected_kind(op: &BuildOp) -> BlockKind {
    match op {
        BuildOp::Heading(_, level, _) => BlockKind::Heading { level: *level },
        BuildOp::Paragraph(..) => BlockKind::Paragraph,
        BuildOp::ListItem(..) => BlockKind::ListItem,
        BuildOp::PageBreak => BlockKind::PageBreak,
    }
}

fn build_tree_with_ops(ops: &[BuildOp]) -> DocumentTree {
    let mut tree = DocumentTree::new(StyleRegistry::new("Segoe UI", 11.0).unwrap());
    for op in ops.iter().cloned() {
        match op {
            BuildOp::Heading(text, level, options) => {
                tree.add_heading(text, level, options).unwrap();
            },
            BuildOp::Paragraph(runs, alignment) => {
                tree.add_paragraph(runs, alignment).unwrap();
            },
            BuildOp::ListItem(lead, trailing) => {
                tree.add_list_item(lead, trailing).unwrap();
            },
            BuildOp::PageBreak => {
                tree.add_page_break();
            },
        }
    }
    tree
}

fn build_tree(blocks: Vec<Block>) -> DocumentTree {
    let mut tree = DocumentTree::new(StyleRegistry::new("Segoe UI", 11.0).unwrap());
    for block in blocks {
        tree.push(block).unwrap();
    }
    tree
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_block_count_is_preserved(blocks in proptest::collection::vec(block_strategy(), 0..24)) {
        let tree = build_tree(blocks);
        let bytes = Serializer::new().serialize(&tree).unwrap();
        let parsed = DocxReader::from_bytes(bytes).unwrap().blocks().unwrap();

        prop_assert_eq!(parsed.len(), tree.len());
        for (parsed, block) in parsed.iter().zip(tree.blocks()) {
            prop_assert_eq!(parsed.kind, block.kind());
        }
    }

    #[test]
    fn test_resolved_formatting_round_trips(blocks in proptest::collection::vec(block_strategy(), 1..12)) {
        let tree = build_tree(blocks);
        let bytes = Serializer::new().serialize(&tree).unwrap();
        let parsed = DocxReader::from_bytes(bytes).unwrap().blocks().unwrap();

        prop_assert_eq!(parsed, tree.resolved_blocks());
    }

    #[test]
    fn test_builder_calls_map_to_paragraphs(ops in proptest::collection::vec(build_op_strategy(), 0..24)) {
        let tree = build_tree_with_ops(&ops);
        let bytes = Serializer::new().serialize(&tree).unwrap();
        let parsed = DocxReader::from_bytes(bytes).unwrap().blocks().unwrap();

        prop_assert_eq!(tree.len(), ops.len());
        prop_assert_eq!(parsed.len(), ops.len());
        for (parsed, op) in parsed.iter().zip(&ops) {
            prop_assert_eq!(parsed.kind, expected_kind(op));
        }
        prop_assert_eq!(parsed, tree.resolved_blocks());
    }

    #[test]
    fn test_page_breaks_carry_no_runs(count in 0usize..16) {
        let tree = build_tree(vec![Block::page_break(); count]);
        let bytes = Serializer::new().serialize(&tree).unwrap();
        let parsed = DocxReader::from_bytes(bytes).unwrap().blocks().unwrap();

        prop_assert_eq!(parsed.len(), count);
        prop_assert!(parsed.iter().all(|b| b.kind == BlockKind::PageBreak && b.runs.is_empty()));
    }
}
