//! towerinv-client: Remote source access
//!
//! Defines the [`InventorySource`] capability and its HTTP implementation,
//! [`TowerClient`], which authenticates with basic credentials or a login token.
//!
//! # Example
//!
//! ```no_run
//! use towerinv_client::{AuthMode, ClientConfig, Credentials, InventorySource, TowerClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = ClientConfig::new(
//!     "https://tower.example.com",
//!     Credentials::new("admin", "secret"),
//! );
//! config.auth_mode = AuthMode::Token;
//!
//! let client = TowerClient::connect(config).await?;
//! for inventory in client.list_inventories().await? {
//!     println!("[{}] {}", inventory.id, inventory.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod http;
pub mod traits;

pub use auth::{AuthMode, Credentials};
pub use error::{ClientError, Result};
pub use http::{ClientConfig, DEFAULT_API_PATH, DEFAULT_PAGE_SIZE, TowerClient};
pub use traits::InventorySource;
