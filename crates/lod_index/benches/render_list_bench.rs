//! Render list benchmarks.
//!
//! - **index**: insertion and unpruned traversal over a filled region
//! - **build**: one pass with each frustum kind, camera in the middle
//! - **frame**: primary + shadow passes, sequential vs `build_frame`
//! - **interner**: add / serialize / deserialize of a section ID map

use std::io::Cursor;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{DVec2, DVec3, Mat4, Vec3};
use lod_index::{
  BlockBiomePair, BoxCullFrustum, CullingConfig, FrustumBounds, IdentityInterner, NeverCullFrustum,
  PassRequest, QuadTreeConfig, QuadTreeIndex, RenderListBuilder, RenderPass, RenderSection,
  SectionPos, ViewParams, WorldHeight,
};

type Index = QuadTreeIndex<Arc<RenderSection<u32>>>;

/// Chunk-level sections filling `radius` chunks around the origin, plus one
/// coarse section per region-sized parent.
fn filled_index(radius: i32) -> Index {
  let index = QuadTreeIndex::new(QuadTreeConfig::new(4, 10));
  let mut handle = 0u32;
  for x in -radius..radius {
    for z in -radius..radius {
      let pos = SectionPos::new(4, x, z).unwrap();
      let section = Arc::new(RenderSection::new(pos));
      section.set_buffer(Some(handle));
      index.insert(pos, section).unwrap();
      handle += 1;
    }
  }
  for pos in index.positions() {
    let coarse = pos.parent_at(7).unwrap();
    if !index.contains(&coarse) {
      let section = Arc::new(RenderSection::new(coarse));
      section.set_buffer(Some(handle));
      index.insert(coarse, section).unwrap();
      handle += 1;
    }
  }
  index
}

fn view() -> ViewParams {
  let view = Mat4::look_at_rh(Vec3::new(0.0, 120.0, 0.0), Vec3::new(200.0, 64.0, 200.0), Vec3::Y);
  let projection = Mat4::perspective_rh_gl(70f32.to_radians(), 16.0 / 9.0, 0.1, 4096.0);
  ViewParams::new(DVec2::ZERO, projection * view, WorldHeight::DEFAULT)
}

fn shadow_view() -> ViewParams {
  let view = Mat4::look_at_rh(Vec3::new(300.0, 800.0, 300.0), Vec3::ZERO, Vec3::Y);
  let projection = Mat4::orthographic_rh_gl(-512.0, 512.0, -512.0, 512.0, 1.0, 2000.0);
  ViewParams::new(DVec2::ZERO, projection * view, WorldHeight::DEFAULT)
}

fn bench_index(c: &mut Criterion) {
  let mut group = c.benchmark_group("index");

  for radius in [16, 32] {
    group.bench_with_input(BenchmarkId::new("fill", radius), &radius, |b, &radius| {
      b.iter(|| filled_index(black_box(radius)))
    });

    let index = filled_index(radius);
    group.bench_with_input(BenchmarkId::new("traverse_all", radius), &index, |b, index| {
      b.iter(|| index.traverse(|_, _| false).count())
    });
  }

  group.finish();
}

fn bench_build(c: &mut Criterion) {
  let mut group = c.benchmark_group("build");
  let index = filled_index(32);
  let view = view();

  let mut builder = RenderListBuilder::new(CullingConfig::DEFAULT);
  let mut frustum = FrustumBounds::new();
  group.bench_function("frustum_bounds", |b| {
    b.iter(|| builder.build(RenderPass::Primary, &index, &mut frustum, black_box(&view)).len())
  });

  let mut box_cull = BoxCullFrustum::new(256.0);
  box_cull.set_camera(DVec3::new(0.0, 120.0, 0.0));
  group.bench_function("box_cull", |b| {
    b.iter(|| builder.build(RenderPass::Primary, &index, &mut box_cull, black_box(&view)).len())
  });

  let mut never = NeverCullFrustum;
  group.bench_function("never_cull", |b| {
    b.iter(|| builder.build(RenderPass::Primary, &index, &mut never, black_box(&view)).len())
  });

  let mut unculled = RenderListBuilder::new(CullingConfig::NO_CULLING);
  group.bench_function("culling_disabled", |b| {
    b.iter(|| unculled.build(RenderPass::Primary, &index, &mut frustum, black_box(&view)).len())
  });

  group.finish();
}

fn bench_frame(c: &mut Criterion) {
  let mut group = c.benchmark_group("frame");
  let index = filled_index(32);
  let view = view();
  let shadow_view = shadow_view();
  let mut builder = RenderListBuilder::new(CullingConfig::DEFAULT);
  let mut primary = FrustumBounds::new();
  let mut shadow = FrustumBounds::new();

  group.bench_function("sequential", |b| {
    b.iter(|| {
      builder.build(RenderPass::Primary, &index, &mut primary, &view);
      builder.build(RenderPass::Shadow, &index, &mut shadow, &shadow_view);
    })
  });

  group.bench_function("parallel", |b| {
    b.iter(|| {
      builder.build_frame(
        &index,
        PassRequest {
          frustum: &mut primary,
          view: &view,
        },
        Some(PassRequest {
          frustum: &mut shadow,
          view: &shadow_view,
        }),
      );
    })
  });

  group.finish();
}

fn bench_interner(c: &mut Criterion) {
  let mut group = c.benchmark_group("interner");
  let pos = SectionPos::new(4, 0, 0).unwrap();
  let pairs: Vec<BlockBiomePair> = (0..256)
    .map(|i| BlockBiomePair::new(format!("biome_{}", i % 8), format!("block_{i}")))
    .collect();

  group.bench_function("add_if_absent_256", |b| {
    b.iter(|| {
      let interner = IdentityInterner::new(pos);
      for pair in &pairs {
        black_box(interner.add_if_absent(pair.clone()));
      }
      interner
    })
  });

  let interner = IdentityInterner::new(pos);
  for pair in &pairs {
    interner.add_if_absent(pair.clone());
  }
  let mut bytes = Vec::new();
  interner.serialize(&mut bytes).unwrap();

  group.bench_function("serialize_256", |b| {
    b.iter(|| {
      let mut out = Vec::with_capacity(bytes.len());
      interner.serialize(&mut out).unwrap();
      out
    })
  });

  group.bench_function("deserialize_256", |b| {
    b.iter(|| {
      IdentityInterner::<BlockBiomePair>::deserialize(&mut Cursor::new(black_box(&bytes)), pos)
        .unwrap()
    })
  });

  group.finish();
}

criterion_group!(tree, bench_index);
criterion_group!(passes, bench_build, bench_frame);
criterion_group!(ids, bench_interner);
criterion_main!(tree, passes, ids);
