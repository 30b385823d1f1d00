use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use trailmap_core::{Node, RoadmapConfig, Side};
use trailmap_layout::{LayoutOptions, layout_roadmap};

fn balanced_tree(depth: usize, fanout: usize) -> Node {
    fn grow(node: &mut Node, level: usize, depth: usize, fanout: usize) {
        if level == depth {
            return;
        }
        for i in 0..fanout {
            let mut child = Node::new(format!("{} / item {i} with a longer label", node.name));
            if level == 0 {
                child.category = Some(format!("Area {i}"));
                child.side = Some(if i % 2 == 0 { Side::Left } else { Side::Right });
            }
            grow(&mut child, level + 1, depth, fanout);
            node.children.push(child);
        }
    }
    let mut root = Node::new("Root");
    grow(&mut root, 0, depth, fanout);
    root
}

fn bench_roadmap_layout_stress(c: &mut Criterion) {
    let root = balanced_tree(5, 5);
    let config = RoadmapConfig::default();
    let options = LayoutOptions::default();

    let mut group = c.benchmark_group("layout_stress");
    group.sample_size(30);
    group.bench_function("roadmap_balanced_tree_5x5", |b| {
        b.iter(|| {
            let out = layout_roadmap(black_box(&root), &config, &options).expect("layout");
            black_box(out.nodes.len() ^ out.categories.len());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_roadmap_layout_stress);
criterion_main!(benches);
