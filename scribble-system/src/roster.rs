use std::num::Wrapping;

use crate::message::{Color, ConnectionId, User};

/// Display colors handed out in connection order. The cursor only ever
/// advances, so colors repeat once more users than palette entries have
/// connected over the server's lifetime.
pub const PALETTE: [Color; 7] = [
    Color { r: 0xFF, g: 0x00, b: 0x00 },
    Color { r: 0x00, g: 0x00, b: 0xFF },
    Color { r: 0x00, g: 0xFF, b: 0x00 },
    Color { r: 0xFF, g: 0xFF, b: 0x00 },
    Color { r: 0xFF, g: 0x00, b: 0xFF },
    Color { r: 0x00, g: 0xFF, b: 0xFF },
    Color { r: 0xFF, g: 0xA5, b: 0x00 },
];

/// Active users in join order. Identities are single-use: an id is never
/// reassigned to a different user while the server runs, and a reconnecting
/// client is simply a new user.
pub struct Roster {
    users: Vec<User>,
    connection_id_source: Wrapping<ConnectionId>,
    palette_cursor: Wrapping<usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            connection_id_source: Wrapping(0),
            palette_cursor: Wrapping(0),
        }
    }

    pub fn register(&mut self) -> User {
        self.connection_id_source += Wrapping(1);
        let color = PALETTE[self.palette_cursor.0 % PALETTE.len()];
        self.palette_cursor += Wrapping(1);

        let user = User {
            id: self.connection_id_source.0,
            color,
        };
        self.users.push(user.clone());
        user
    }

    pub fn unregister(&mut self, id: &ConnectionId) -> Option<User> {
        match self.users.iter().position(|user| user.id == *id) {
            Some(position) => Some(self.users.remove(position)),
            None => {
                log::warn!("Tried to unregister unknown user: {}", id);
                None
            }
        }
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&User> {
        self.users.iter().find(|user| user.id == *id)
    }

    pub fn list(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_assigns_increasing_ids() {
        let mut roster = Roster::new();
        let first = roster.register();
        let second = roster.register();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn it_cycles_the_palette_in_order() {
        let mut roster = Roster::new();
        for expected in PALETTE.iter() {
            assert_eq!(roster.register().color, *expected);
        }
        // Eighth user wraps back to the first color.
        assert_eq!(roster.register().color, PALETTE[0]);
    }

    #[test]
    fn departures_do_not_rewind_the_palette() {
        let mut roster = Roster::new();
        let first = roster.register();
        roster.unregister(&first.id).expect("must unregister");
        assert_eq!(roster.register().color, PALETTE[1]);
    }

    #[test]
    fn it_lists_users_in_join_order() {
        let mut roster = Roster::new();
        let a = roster.register();
        let b = roster.register();
        let c = roster.register();

        roster.unregister(&b.id).expect("must unregister");

        let ids: Vec<_> = roster.list().iter().map(|user| user.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn unregistering_an_unknown_id_is_a_noop() {
        let mut roster = Roster::new();
        roster.register();
        assert!(roster.unregister(&42).is_none());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn get_finds_only_active_users() {
        let mut roster = Roster::new();
        let user = roster.register();
        assert_eq!(roster.get(&user.id), Some(&user));

        roster.unregister(&user.id).expect("must unregister");
        assert!(roster.get(&user.id).is_none());
    }
}
