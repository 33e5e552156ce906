//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers under `/api/v1/users`.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── tokens.rs   - Refresh-token rotation and logout
//! └── account.rs  - Password, profile, images, channel profile, history
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: account fields → user created (no tokens issued)
//! 2. **Login**: username or email plus password → access and refresh tokens
//! 3. **Refresh**: current refresh token → new pair, old refresh token revoked
//! 4. **Logout**: stored refresh token cleared

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Token rotation and logout
pub mod tokens;

/// Account management handlers
pub mod account;

pub use account::{
    change_password, current_user, get_user_channel_profile, update_account, update_avatar,
    update_cover_image, watch_history,
};
pub use login::login;
pub use register::register;
pub use tokens::{logout, refresh_access_token};
pub use types::{LoginRequest, LoginResponse, RegisterRequest, TokenPair, UserResponse};
