pub mod recording;
pub mod terminal;

pub use recording::{RecordingRenderer, RendererCall};
pub use terminal::{visible_text, CallLogComparator};

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("ansi_cells=debug,ansi_cells_parser=debug")),
            )
            .with_test_writer()
            .init();
    });
}
