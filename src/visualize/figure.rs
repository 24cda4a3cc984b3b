use super::VisualizeError;
use crate::vision::Vision;
use image::RgbImage;
use log::info;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 显示模式的输出端：按编号打开（或复用）一个窗口并渲染图像。
/// 同一编号再次显示时替换原有内容。
pub trait FigureSink {
    fn show(&mut self, figure: usize, title: &str, image: &RgbImage)
    -> Result<(), VisualizeError>;
}

/// 在内存中保存每个窗口最近一次显示的内容
#[derive(Debug, Default)]
pub struct FigureBoard {
    figures: BTreeMap<usize, (String, RgbImage)>,
}

impl FigureBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已打开的窗口编号（升序）
    pub fn ids(&self) -> Vec<usize> {
        self.figures.keys().copied().collect()
    }

    pub fn get(&self, figure: usize) -> Option<(&str, &RgbImage)> {
        self.figures
            .get(&figure)
            .map(|(title, image)| (title.as_str(), image))
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}

impl FigureSink for FigureBoard {
    fn show(
        &mut self,
        figure: usize,
        title: &str,
        image: &RgbImage,
    ) -> Result<(), VisualizeError> {
        self.figures
            .insert(figure, (title.to_string(), image.clone()));
        Ok(())
    }
}

/// 把每个窗口渲染为预览目录下的`figure-<编号>.png`。
///
/// 输入图像的窗口1、2、3在每次导出后都会显示，所以即使导出因
/// `MissingObjectName`失败，预览目录下仍会写入`figure-1.png`至`figure-3.png`；
/// 导出根目录则不受影响。
#[derive(Debug, Clone)]
pub struct FigureDirectory {
    dir: PathBuf,
}

impl FigureDirectory {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn figure_path(&self, figure: usize) -> PathBuf {
        self.dir.join(format!("figure-{figure}.png"))
    }
}

impl FigureSink for FigureDirectory {
    fn show(
        &mut self,
        figure: usize,
        title: &str,
        image: &RgbImage,
    ) -> Result<(), VisualizeError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| VisualizeError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.figure_path(figure);
        Vision::save_image(image, &path)?;
        info!("窗口{figure}（{title}）：{}", path.display());
        Ok(())
    }
}
