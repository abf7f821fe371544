//! ログ初期化
//!
//! `RUST_LOG` があればそれを優先し、無ければ `--verbose` で debug、通常は info。
//! ログは stderr、進捗表示は stdout に出す。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "config_lens=debug,config_lens_common=debug"
    } else {
        "config_lens=info,config_lens_common=info"
    }
}

pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_target(verbose)
        .with_writer(std::io::stderr);

    // 二重初期化（テストなど）は無視
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
