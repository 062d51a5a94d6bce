//! Uniform grid: children fill cells row by row, every cell sized to the
//! largest child.

use trellis_ui_graphics::{Color, EdgeInsets, Point, Size};
use trellis_ui_layout::{Constraints, LayoutError};

use crate::element::{content_space, AnyElement, Element, LayoutContext};
use crate::render_node::{NodeKind, NodeStyle, RenderNode};

#[derive(Clone, Debug)]
pub struct GridSpec {
    pub key: Option<String>,
    pub columns: usize,
    /// Gap between adjacent cells, on both axes.
    pub spacing: f32,
    pub margin: EdgeInsets,
    pub border: EdgeInsets,
    pub padding: EdgeInsets,
    pub style: NodeStyle,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            key: None,
            columns: 1,
            spacing: 0.0,
            margin: EdgeInsets::ZERO,
            border: EdgeInsets::ZERO,
            padding: EdgeInsets::ZERO,
            style: NodeStyle::default(),
        }
    }
}

impl GridSpec {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    pub fn border(mut self, border: EdgeInsets, color: Color) -> Self {
        self.border = border;
        self.style.border_color = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.style.background = Some(color);
        self
    }
}

pub struct GridLayout {
    spec: GridSpec,
    children: Vec<AnyElement>,
}

impl GridLayout {
    pub fn new(spec: GridSpec, children: Vec<AnyElement>) -> Self {
        Self { spec, children }
    }

    fn columns(&self) -> usize {
        if self.spec.columns == 0 {
            log::warn!("grid with zero columns; using one");
            return 1;
        }
        self.spec.columns
    }
}

impl Element for GridLayout {
    fn layout(
        &self,
        cx: &mut LayoutContext<'_>,
        constraints: Constraints,
    ) -> Result<RenderNode, LayoutError> {
        cx.scoped(self.spec.key.as_deref(), |cx, key| {
            let columns = self.columns();
            let spacing = self.spec.spacing.max(0.0);
            let insets = self.spec.margin + self.spec.border + self.spec.padding;
            let content = content_space(key, &constraints, insets);
            let cell_width = if content.width.is_finite() {
                ((content.width - spacing * (columns - 1) as f32) / columns as f32).max(0.0)
            } else {
                f32::INFINITY
            };
            let cell_constraints = Constraints::shrink(Size::new(cell_width, content.height));

            let mut children = Vec::with_capacity(self.children.len());
            let mut cell = Size::ZERO;
            for (index, child) in self.children.iter().enumerate() {
                let node = cx.layout_child(index, child.as_ref(), cell_constraints)?;
                cell = cell.max(node.size);
                children.push(node);
            }

            let used_columns = columns.min(children.len());
            let rows = children.len().div_ceil(columns);
            let gaps = |count: usize| spacing * count.saturating_sub(1) as f32;
            let grid_size = Size::new(
                cell.width * used_columns as f32 + gaps(used_columns),
                cell.height * rows as f32 + gaps(rows),
            );

            let origin = insets.top_left();
            let placed: Vec<RenderNode> = children
                .into_iter()
                .enumerate()
                .map(|(index, child)| {
                    let (row, column) = (index / columns, index % columns);
                    child.placed_at(Point::new(
                        origin.x + column as f32 * (cell.width + spacing),
                        origin.y + row as f32 * (cell.height + spacing),
                    ))
                })
                .collect();

            Ok(RenderNode::builder(key.clone(), NodeKind::Grid)
                .size(grid_size.outset(insets))
                .insets(self.spec.margin, self.spec.border, self.spec.padding)
                .style(self.spec.style.clone())
                .children(placed)
                .build())
        })
    }
}
