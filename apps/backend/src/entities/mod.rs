pub mod room_cards;
pub mod room_players;
pub mod rooms;

pub use room_cards::Entity as RoomCards;
pub use room_cards::Model as RoomCard;
pub use room_players::Entity as RoomPlayers;
pub use room_players::Model as RoomPlayer;
pub use rooms::Entity as Rooms;
pub use rooms::Model as Room;
