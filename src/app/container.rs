use std::sync::Arc;

use crate::adapters::{FfmpegAdapter, FfprobeAdapter, PipelineConfig};
use crate::app::{inspect_interactor::InspectInteractor, pipeline_interactor::PipelineInteractor};
use crate::domain::rules::SegmentDurationGate;
use crate::error::ClipResult;
use crate::ports::{ExecutePort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn pipeline_interactor(&self) -> Arc<PipelineInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
}

pub struct DefaultAppContainer {
    pipeline_interactor: Arc<PipelineInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
}

impl DefaultAppContainer {
    /// Wire the ffprobe/ffmpeg adapters named in the configuration
    pub fn new(config: &PipelineConfig) -> ClipResult<Self> {
        let probe_port = Arc::new(FfprobeAdapter::new(config.encoder.ffprobe_bin.clone()));
        let execute_port = Arc::new(FfmpegAdapter::new(config.encoder.clone()));
        Self::with_ports(probe_port, execute_port, config)
    }

    /// Wire arbitrary port implementations
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        config: &PipelineConfig,
    ) -> ClipResult<Self> {
        let pipeline_interactor = Arc::new(PipelineInteractor::new(
            probe_port,
            execute_port,
            config,
        )?);
        let inspect_interactor = Arc::new(InspectInteractor::new(SegmentDurationGate::new(
            config.duration.policy()?,
        )));

        Ok(Self {
            pipeline_interactor,
            inspect_interactor,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn pipeline_interactor(&self) -> Arc<PipelineInteractor> {
        Arc::clone(&self.pipeline_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }
}
