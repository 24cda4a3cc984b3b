use crate::visualize::{DisplayTarget, ExportTarget};
use std::path::{Path, PathBuf};

#[test]
fn test_export_target_path() {
    let target = ExportTarget {
        object_name: "cup",
        layer_index: 1,
        channel_index: 3,
    };
    let root = Path::new("filter-responses");
    assert_eq!(
        target.layer_dir(root),
        PathBuf::from("filter-responses/object-cup/layer-1")
    );
    assert_eq!(
        target.path(root),
        PathBuf::from("filter-responses/object-cup/layer-1/filter-3.png")
    );
}

#[test]
fn test_display_target_figure() {
    let target = DisplayTarget {
        layer_index: 1,
        channel_index: 4,
    };
    assert_eq!(target.figure(10), 14);

    // 通道序号达到基数后会与下一层冲突
    let a = DisplayTarget {
        layer_index: 1,
        channel_index: 10,
    };
    let b = DisplayTarget {
        layer_index: 2,
        channel_index: 0,
    };
    assert_eq!(a.figure(10), b.figure(10));
}
