//! Snapshot tests using the insta crate.
//!
//! Inline snapshots keep the expected text next to the assertion. To update
//! them after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::{ready_cutout, summary};
use collage::composition::{CompositionRegion, CompositionSurface, RegionConfig};
use collage::dnd::{DropRule, TargetKind};
use collage::geometry::{Extent, Point, Rect};

#[test]
fn snapshot_layer_order() {
    let region = CompositionRegion::new(Rect::from_xywh(0.0, 0.0, 600.0, 800.0), RegionConfig::default());
    let mut surface = CompositionSurface::new(region, Extent::new(1280.0, 1024.0));
    let first = surface
        .insert_cutout(ready_cutout(Point::default(), Extent::new(200.0, 150.0), [1, 1, 1, 255]), Point::new(10.0, 20.0))
        .unwrap();
    let second = surface
        .insert_cutout(ready_cutout(Point::default(), Extent::new(50.0, 50.0), [2, 2, 2, 255]), Point::new(30.0, 40.0))
        .unwrap();
    surface.select(Some(second));
    surface.bring_to_front(first);

    insta::assert_snapshot!(surface.describe_layers().trim_end(), @r"
    region 600x800 at 340,112
    placement #2* 50x50 at 30,40
    placement #1 200x150 at 10,20
    ");
}

#[test]
fn snapshot_drop_rules() {
    let table = TargetKind::ALL
        .iter()
        .map(|target| format!("{:?}: {:?}", target, DropRule::accepted(*target)))
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(table, @r"
    CaptureSurface: [Collection]
    Magazine: [Page]
    Canvas: [Page, Cutout]
    TransitionTarget: [Cutout]
    ");
}

#[test]
fn snapshot_collection_summary() {
    insta::assert_json_snapshot!(summary("c1"), @r#"
    {
      "uid": "c1",
      "name": "Collection c1",
      "cover_image": "c1-cover.jpg",
      "page_count": 3,
      "user_name": "tester",
      "type": "Magazine"
    }
    "#);
}
