use env_logger::Env;
use inception_viz::config::{DEFAULT_CONFIG_FILE, RunConfig};
use inception_viz::nn::{Network, demo_network};
use inception_viz::vision::Vision;
use inception_viz::visualize::{FigureDirectory, capture_activations};
use log::info;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = RunConfig::load_or_default(DEFAULT_CONFIG_FILE)?;

    let mut network = if config.use_pretrained {
        Network::load_for_inference(&config.model_path)?
    } else {
        demo_network(config.seed)?
    };
    info!("网络`{}`共{}层", network.name(), network.len());

    let input = Vision::load_image_as_batch(&config.image_path)?;
    info!(
        "已载入图像{}，形状{:?}",
        config.image_path.display(),
        input.shape()
    );

    let output = network.forward(&input)?;
    info!("推理完成，输出形状{:?}", output.shape());

    let activations = capture_activations(&network)?;
    let exporter = config.exporter();
    info!("导出根目录：{}", exporter.root().display());
    let mut sink = FigureDirectory::new(&config.preview_dir);
    let report = exporter.export(
        &activations,
        &input,
        config.mode,
        config.object_name.as_deref(),
        &mut sink,
    )?;

    info!(
        "已处理第{:?}层：写入{}个文件，显示{}个窗口",
        report.layers,
        report.written.len(),
        report.figures.len()
    );
    Ok(())
}
