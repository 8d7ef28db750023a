pub mod evidence;
pub mod image;
pub mod plan;
pub mod router;
