//! Swap Execution Engine Library
//!
//! Executes pre-built aggregator swaps through ParaSwap Augustus routers
//! while treating the router as untrusted: registry-gated routing,
//! oracle-bounded slippage, call-time amount patching, and post-call
//! balance verification with unconditional allowance cleanup.

pub mod calldata;
pub mod config;
pub mod contracts;
pub mod engine;
pub mod error;
pub mod onchain;
pub mod quote;
pub mod registry;
pub mod selectors;
pub mod types;

// Re-export commonly used types
pub use config::{load_config, load_config_from_file};
pub use engine::{PriceOracle, RouterRegistry, SettlementAccount, SwapExecutor};
pub use error::{RouterRevert, SwapError};
pub use quote::{QuoteCache, QuoteParams, QuotePayload};
pub use registry::RouterAllowlistFilter;
pub use selectors::resolve_offset;
pub use types::{BotConfig, SwapRequest, SwapResult, TradeSide};
