use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trellis_render_common::{MonospaceMetrics, RecordingSurface};
use trellis_ui::{
    find_path_to_node_at_point, paint, AnyElement, BoxSpec, Constraints, FrameRequester, HBox,
    Interaction, KeyVendor, LayoutContext, RenderNode, SelfLayout, Spacer, StateCache, Text,
    TextSpec, VBox,
};
use trellis_ui_graphics::{Point, Size};

const SECTION_COUNT: usize = 4;
const ROWS_PER_SECTION: usize = 32;
const LAYOUT_ROWS_PER_SECTION_SAMPLES: &[usize] = &[8, 16, 32, 64];
const ROOT_SIZE: Size = Size {
    width: 1080.0,
    height: 1920.0,
};

fn pipeline_content(sections: usize, rows_per_section: usize) -> AnyElement {
    let sections = (0..sections)
        .map(|section| {
            let mut rows = vec![Text(format!("Section {section}"), TextSpec::new())];
            rows.extend((0..rows_per_section).map(|row| {
                HBox(
                    BoxSpec::new().main_axis_self_layout(SelfLayout::Grow),
                    vec![
                        Text(format!("Item {section}-{row} title"), TextSpec::new()),
                        Spacer(),
                        Text(format!("Detail {section}-{row}"), TextSpec::new()),
                    ],
                )
            }));
            VBox(BoxSpec::new().main_axis_self_layout(SelfLayout::Shrink), rows)
        })
        .collect();
    VBox(BoxSpec::new().fill(), sections)
}

struct PipelineFixture {
    keys: KeyVendor,
    state: StateCache,
    metrics: MonospaceMetrics,
    sections: usize,
    rows_per_section: usize,
}

impl PipelineFixture {
    fn new(sections: usize, rows_per_section: usize) -> Self {
        Self {
            keys: KeyVendor::new(),
            state: StateCache::new(),
            metrics: MonospaceMetrics::default(),
            sections,
            rows_per_section,
        }
    }

    fn layout(&mut self) -> RenderNode {
        let content = pipeline_content(self.sections, self.rows_per_section);
        let mut cx = LayoutContext::new(
            &mut self.keys,
            &self.state,
            &self.metrics,
            FrameRequester::detached(),
        );
        let tree = cx
            .layout_root(content.as_ref(), Constraints::grow(ROOT_SIZE))
            .expect("layout");
        self.state.sweep();
        tree
    }
}

fn node_count(sections: usize, rows_per_section: usize) -> usize {
    // Every text contributes itself and one line node.
    1 + sections * (3 + rows_per_section * 6)
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("pipeline_build", |b| {
        b.iter(|| black_box(pipeline_content(SECTION_COUNT, ROWS_PER_SECTION)));
    });
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_layout");
    for &rows_per_section in LAYOUT_ROWS_PER_SECTION_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("nodes", node_count(SECTION_COUNT, rows_per_section)),
            &rows_per_section,
            |b, &rows_per_section| {
                let mut fixture = PipelineFixture::new(SECTION_COUNT, rows_per_section);
                fixture.layout();
                b.iter(|| black_box(fixture.layout()));
            },
        );
    }
    group.finish();
}

fn bench_paint(c: &mut Criterion) {
    let mut fixture = PipelineFixture::new(SECTION_COUNT, ROWS_PER_SECTION);
    let tree = fixture.layout();
    let mut surface = RecordingSurface::default();
    let interaction = Interaction::default();

    c.bench_function("pipeline_paint", |b| {
        b.iter(|| {
            surface.clear();
            paint(&tree, &mut surface, &interaction);
            black_box(surface.operations().len());
        });
    });
}

fn bench_hit_test(c: &mut Criterion) {
    let mut fixture = PipelineFixture::new(SECTION_COUNT, ROWS_PER_SECTION);
    let tree = fixture.layout();

    c.bench_function("pipeline_hit_test", |b| {
        b.iter(|| {
            let path = find_path_to_node_at_point(black_box(Point::new(900.0, 1000.0)), &tree);
            black_box(path.map(|path| path.count()));
        });
    });
}

criterion_group!(
    pipeline,
    bench_build,
    bench_layout,
    bench_paint,
    bench_hit_test
);
criterion_main!(pipeline);
