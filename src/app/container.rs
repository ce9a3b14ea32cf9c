// Application container - Wires adapters into the trim interactor

use std::sync::Arc;

use tracing::debug;

use crate::adapters::{AppConfig, FfmpegAdapter, FfprobeAdapter, LocalFsAdapter};
use crate::app::trim_interactor::TrimInteractor;
use crate::domain::rules::RangeValidator;
use crate::ports::{ExecutePort, FsPort, ProbePort};

pub struct AppContainer {
    config: AppConfig,
    trim_interactor: Arc<TrimInteractor>,
}

impl AppContainer {
    /// Build the production adapters from a validated configuration
    pub fn new(config: AppConfig) -> Self {
        let probe_port = Arc::new(FfprobeAdapter::new(
            config.tools.ffprobe.clone(),
            config.limits.probe_timeout(),
        ));
        let execute_port = Arc::new(FfmpegAdapter::new(
            config.tools.ffmpeg.clone(),
            config.limits.trim_timeout(),
        ));
        let fs_port = Arc::new(LocalFsAdapter::new());

        let trim_interactor = Arc::new(
            TrimInteractor::new(
                probe_port as Arc<dyn ProbePort>,
                execute_port as Arc<dyn ExecutePort>,
                fs_port as Arc<dyn FsPort>,
            )
            .with_validator(RangeValidator::new(config.validation.end_tolerance_secs)),
        );

        debug!(
            ffmpeg = %config.tools.ffmpeg.display(),
            ffprobe = %config.tools.ffprobe.display(),
            "Application container ready"
        );

        Self {
            config,
            trim_interactor,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn trim_interactor(&self) -> Arc<TrimInteractor> {
        Arc::clone(&self.trim_interactor)
    }
}
