//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。
//! フレームのエンコード・デコードは UI 層の責務です。

pub mod broadcast_subtitle;
pub mod connect_session;
pub mod disconnect_session;
pub mod error;
pub mod shutdown;
pub mod start_listening;
pub mod stop_listening;

pub use broadcast_subtitle::BroadcastSubtitleUseCase;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{ConnectError, ListeningError};
pub use shutdown::ShutdownUseCase;
pub use start_listening::StartListeningUseCase;
pub use stop_listening::StopListeningUseCase;
