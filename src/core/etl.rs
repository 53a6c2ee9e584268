use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        let monitor = SystemMonitor::new(monitor_enabled);
        if monitor.is_enabled() {
            tracing::info!("System monitoring enabled");
        }
        Self { pipeline, monitor }
    }

    /// Runs extract → transform → load once and returns the output path.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting conversion");

        tracing::info!("Extracting records...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_data.len());
        self.monitor.log_stats("extract");

        tracing::info!("Projecting records...");
        let transformed = self.pipeline.transform(raw_data).await?;
        tracing::info!("Projected {} students", transformed.len());
        self.monitor.log_stats("transform");

        tracing::info!("Writing roster...");
        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
