/// The document tree and its append-only builder API.
use crate::ooxml::docx::format::Alignment;
use crate::ooxml::docx::writer::paragraph::{Block, BlockKind, HeadingOptions, ResolvedBlock};
use crate::ooxml::docx::writer::props::DocumentProperties;
use crate::ooxml::docx::writer::run::Run;
use crate::ooxml::docx::writer::style::StyleRegistry;
use crate::ooxml::error::{OoxmlError, Result};

/// Handle to a block, valid for the tree that returned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockRef(usize);

impl BlockRef {
    /// Position of the block in document order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// An ordered sequence of blocks plus the style registry they resolve against.
///
/// Blocks can only be appended. A failed append leaves the tree unchanged.
///
/// # Examples
///
/// ```
/// use docwright::ooxml::docx::format::Alignment;
/// use docwright::ooxml::docx::writer::{DocumentTree, HeadingOptions, Run, StyleRegistry};
///
/// let mut tree = DocumentTree::new(StyleRegistry::new("Calibri", 11.0)?);
/// tree.add_heading("Objective", 1, HeadingOptions::new())?;
/// tree.add_paragraph(vec![Run::new("Keep it cold.")], Alignment::Justify)?;
/// tree.add_list_item(Run::new("Alerts: ").bold(true), vec![Run::new("instant notifications")])?;
/// tree.add_page_break();
/// assert_eq!(tree.len(), 4);
/// # Ok::<(), docwright::ooxml::error::OoxmlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocumentTree {
    registry: StyleRegistry,
    properties: DocumentProperties,
    blocks: Vec<Block>,
}

impl DocumentTree {
    pub fn new(registry: StyleRegistry) -> Self {
        Self {
            registry,
            properties: DocumentProperties::default(),
            blocks: Vec::new(),
        }
    }

    pub fn with_properties(mut self, properties: DocumentProperties) -> Self {
        self.properties = properties;
        self
    }

    #[inline]
    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    #[inline]
    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    /// Append a heading holding a single run of `text`.
    ///
    /// Levels must be positive; levels above 9 are accepted here and rejected
    /// when the tree is serialized.
    pub fn add_heading(
        &mut self,
        text: impl Into<String>,
        level: i32,
        options: HeadingOptions,
    ) -> Result<BlockRef> {
        if level <= 0 {
            return Err(OoxmlError::InvalidBlock {
                index: self.blocks.len(),
                reason: format!("level must be positive, got {}", level),
            });
        }
        let block = Block::heading(level, vec![options.to_run(text)])
            .with_alignment(options.alignment);
        self.push(block)
    }

    /// Append a body paragraph.
    pub fn add_paragraph(&mut self, runs: Vec<Run>, alignment: Alignment) -> Result<BlockRef> {
        self.push(Block::paragraph(runs).with_alignment(alignment))
    }

    /// Append a bulleted list item: a lead run followed by any trailing runs.
    pub fn add_list_item(&mut self, lead: Run, trailing: Vec<Run>) -> Result<BlockRef> {
        let mut runs = Vec::with_capacity(1 + trailing.len());
        runs.push(lead);
        runs.extend(trailing);
        self.push(Block::list_item(runs))
    }

    /// Append an explicit page break.
    pub fn add_page_break(&mut self) -> BlockRef {
        let block_ref = BlockRef(self.blocks.len());
        self.blocks.push(Block::page_break());
        block_ref
    }

    /// Append a pre-built block after its structural checks.
    pub fn push(&mut self, block: Block) -> Result<BlockRef> {
        let index = self.blocks.len();
        if let Err(reason) = block.check() {
            return Err(OoxmlError::InvalidBlock { index, reason });
        }
        self.blocks.push(block);
        Ok(BlockRef(index))
    }

    pub fn block(&self, block_ref: BlockRef) -> Option<&Block> {
        self.blocks.get(block_ref.0)
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks of each kind, as `(headings, paragraphs, list items, page breaks)`.
    pub fn kind_counts(&self) -> (usize, usize, usize, usize) {
        self.blocks
            .iter()
            .fold((0, 0, 0, 0), |(h, p, l, b), block| match block.kind() {
                BlockKind::Heading { .. } => (h + 1, p, l, b),
                BlockKind::Paragraph => (h, p + 1, l, b),
                BlockKind::ListItem => (h, p, l + 1, b),
                BlockKind::PageBreak => (h, p, l, b + 1),
            })
    }

    /// Every block with its formatting resolved against the registry.
    pub fn resolved_blocks(&self) -> Vec<ResolvedBlock> {
        self.blocks
            .iter()
            .map(|block| block.resolve(&self.registry))
            .collect()
    }
}
