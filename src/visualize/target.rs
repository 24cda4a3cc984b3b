use std::path::{Path, PathBuf};

/// 导出到文件时的目标：`<root>/object-<对象名>/layer-<层序号>/filter-<通道序号>.png`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget<'a> {
    pub object_name: &'a str,
    pub layer_index: usize,
    /// 从1开始
    pub channel_index: usize,
}

impl ExportTarget<'_> {
    /// 图像所在的层目录
    pub fn layer_dir(&self, root: &Path) -> PathBuf {
        root.join(format!("object-{}", self.object_name))
            .join(format!("layer-{}", self.layer_index))
    }

    pub fn path(&self, root: &Path) -> PathBuf {
        self.layer_dir(root)
            .join(format!("filter-{}.png", self.channel_index))
    }
}

/// 显示模式下的窗口编号：`layer_index * base + channel_index`。
/// 通道序号达到`base`后编号可能与下一层冲突。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTarget {
    pub layer_index: usize,
    pub channel_index: usize,
}

impl DisplayTarget {
    pub const fn figure(&self, base: usize) -> usize {
        self.layer_index * base + self.channel_index
    }
}
