use std::path::PathBuf;
use std::sync::Arc;

use page_composer::PdfComposer;
use qr_engine::QrcodeEncoder;
use tokio::sync::{Mutex, MutexGuard, RwLock, broadcast};

use crate::config::{AppConfig, SettingsManager};
use crate::services::coordinator::{Artifact, EncodeStyle, ExportCoordinator};
use crate::services::debounce::Debouncer;
use crate::services::error::Result;
use crate::services::export::{ExportFile, ExportFormat};
use crate::services::feedback::{self, Notice};
use crate::services::size::TargetSize;

/// Application shared state used by the CLI front end and background tasks.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Broadcast channel for user notices
    notice_tx: broadcast::Sender<Notice>,
    /// Application configuration (reloadable)
    config: RwLock<AppConfig>,
    /// Current artifact; held for the whole of a generation
    coordinator: Mutex<ExportCoordinator>,
    /// Pending regenerate-on-input task
    debouncer: std::sync::Mutex<Debouncer>,
}

fn encode_style(config: &AppConfig) -> EncodeStyle {
    EncodeStyle {
        level: config.error_correction,
        background: config.background,
        foreground: config.foreground,
    }
}

impl SharedState {
    /// Create shared state with the built-in encoder and PDF composer.
    pub fn new(config: AppConfig, initial_size: TargetSize) -> Self {
        let coordinator = ExportCoordinator::new(initial_size)
            .with_encoder(Arc::new(QrcodeEncoder))
            .with_composer(Arc::new(PdfComposer::default()))
            .with_style(encode_style(&config));
        Self::with_coordinator(config, coordinator)
    }

    /// Create shared state around an already-configured coordinator.
    pub fn with_coordinator(config: AppConfig, coordinator: ExportCoordinator) -> Self {
        let (notice_tx, _) = broadcast::channel(64);
        let debouncer = Debouncer::new(config.debounce);

        Self {
            inner: Arc::new(SharedStateInner {
                notice_tx,
                config: RwLock::new(config),
                coordinator: Mutex::new(coordinator),
                debouncer: std::sync::Mutex::new(debouncer),
            }),
        }
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.inner.notice_tx.subscribe()
    }

    /// Directory exports are written to.
    pub async fn output_dir(&self) -> PathBuf {
        self.inner.config.read().await.output_dir.clone()
    }

    /// Lock the coordinator. Waits for any generation in flight.
    pub async fn coordinator(&self) -> MutexGuard<'_, ExportCoordinator> {
        self.inner.coordinator.lock().await
    }

    fn debouncer(&self) -> std::sync::MutexGuard<'_, Debouncer> {
        match self.inner.debouncer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!(message = %notice.message, "Notice");
        } else {
            tracing::info!(message = %notice.message, "Notice");
        }
        // No subscribers is fine.
        let _ = self.inner.notice_tx.send(notice);
    }

    /// Reload config from the settings manager. New colours apply to the
    /// next generation, the new delay to the next input.
    pub async fn reload_config(&self, sm: &SettingsManager) -> anyhow::Result<()> {
        let mut config = self.inner.config.write().await;
        config.reload(sm)?;
        self.debouncer().set_delay(config.debounce);
        self.inner
            .coordinator
            .lock()
            .await
            .set_style(encode_style(&config));
        tracing::info!(
            output_dir = %config.output_dir.display(),
            debounce_ms = config.debounce.as_millis() as u64,
            "Settings reloaded"
        );
        Ok(())
    }

    /// Generate a QR code for `text`, at `size` or the preferred size.
    pub async fn generate(&self, text: &str, size: Option<TargetSize>) -> Result<Artifact> {
        let mut coordinator = self.inner.coordinator.lock().await;
        let size = size.unwrap_or_else(|| coordinator.preferred_size());
        match coordinator.generate(text, size).await {
            Ok(artifact) => Ok(artifact.clone()),
            Err(e) => {
                tracing::error!(error = %e, "Generation failed");
                self.notify(feedback::generation_failed(&e));
                Err(e)
            }
        }
    }

    /// Feed a new input value. Generation runs once the input has been
    /// quiet for the configured delay; whitespace-only input only cancels
    /// the pending one.
    pub fn on_input(&self, text: impl Into<String>) {
        let text = text.into();
        let mut debouncer = self.debouncer();
        if text.trim().is_empty() {
            debouncer.cancel();
            return;
        }
        let state = self.clone();
        debouncer.schedule(async move {
            let _ = state.generate(&text, None).await;
        });
    }

    /// Whether a debounced generation is still waiting.
    pub fn input_pending(&self) -> bool {
        self.debouncer().is_pending()
    }

    /// Wait until the latest input has been generated, if there is one.
    pub async fn flush_input(&self) {
        let handle = self.debouncer().take_pending();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Pending generation did not complete");
            }
        }
    }

    /// Build the export for `format` without writing it anywhere.
    pub async fn export_file(&self, format: ExportFormat) -> Result<ExportFile> {
        let coordinator = self.inner.coordinator.lock().await;
        coordinator.export(format).inspect_err(|e| {
            tracing::error!(format = format.label(), error = %e, "Export failed");
            self.notify(feedback::export_failed(format, e));
        })
    }

    /// Export the current artifact as `format` into the output directory.
    pub async fn export(&self, format: ExportFormat) -> Result<PathBuf> {
        let file = self.export_file(format).await?;
        match self.save(&file).await {
            Ok(path) => {
                self.notify(feedback::export_succeeded(format));
                Ok(path)
            }
            Err(e) => {
                self.notify(feedback::export_failed(format, &e));
                Err(e)
            }
        }
    }

    /// Write `file` into the output directory.
    pub async fn save(&self, file: &ExportFile) -> Result<PathBuf> {
        let dir = self.output_dir().await;
        file.save_to_dir(&dir)
    }

    /// Drop the current artifact and any pending input.
    pub async fn clear(&self) {
        self.debouncer().cancel();
        self.inner.coordinator.lock().await.clear();
    }

    /// Change the size, regenerating the current artifact if there is one.
    pub async fn set_size(&self, size: TargetSize) -> Result<bool> {
        let mut coordinator = self.inner.coordinator.lock().await;
        coordinator.set_size(size).await.inspect_err(|e| {
            tracing::error!(size = size.get(), error = %e, "Resize failed");
            self.notify(feedback::generation_failed(e));
        })
    }
}
