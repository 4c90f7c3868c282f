mod modal_overlay;
pub use modal_overlay::{ModalOverlay, SuccessModal};

mod session_view;
pub use session_view::SessionView;
