pub mod rooms;

pub use rooms::RoomService;
