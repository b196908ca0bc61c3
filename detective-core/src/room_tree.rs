use crate::command::Side;
use crate::error::QuestError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(usize);

impl RoomId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A clue lying in a room together with the suspect it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    pub clue: String,
    pub suspect: String,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    evidence: Option<Evidence>,
    left: Option<RoomId>,
    right: Option<RoomId>,
}

impl Room {
    pub fn evidence(&self) -> Option<&Evidence> {
        self.evidence.as_ref()
    }

    pub fn child(&self, side: Side) -> Option<RoomId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// The mansion map. Its shape is fixed once `RoomTreeBuilder::build` returns;
/// the only later mutation is clearing a room's evidence when it is collected.
#[derive(Debug, Clone)]
pub struct RoomTree {
    rooms: Vec<Room>,
    root: RoomId,
}

impl RoomTree {
    /// The seven-room mansion the game ships with.
    pub fn mansion() -> Result<Self, QuestError> {
        let mut b = RoomTreeBuilder::new();
        let hall = b.room_with_clue("Entrance Hall", "Key with a strange symbol", "Helena");
        let sitting = b.room_with_clue("Sitting Room", "Fresh mud footprints", "Otavio");
        let kitchen = b.room_with_clue("Kitchen", "Knife with engraved initials", "Lucia");
        let library = b.room_with_clue("Library", "Book with a marked page", "Helena");
        let garden = b.room_with_clue("Garden", "Footprints leading to the gate", "Otavio");
        let bedroom = b.room_with_clue("Bedroom", "Torn letter on the nightstand", "Lucia");
        let bathroom = b.room_with_clue("Bathroom", "Empty perfume bottle", "Helena");

        let wiring = [
            (hall, Side::Left, sitting),
            (hall, Side::Right, kitchen),
            (sitting, Side::Left, library),
            (sitting, Side::Right, garden),
            (kitchen, Side::Left, bedroom),
            (kitchen, Side::Right, bathroom),
        ];
        for (parent, side, child) in wiring {
            b.link(parent, side, child)?;
        }
        b.build(hall)
    }

    pub fn root(&self) -> RoomId {
        self.root
    }

    /// Number of rooms; all of them are reachable from the root.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn child(&self, id: RoomId, side: Side) -> Option<RoomId> {
        self.room(id).and_then(|r| r.child(side))
    }

    pub fn is_leaf(&self, id: RoomId) -> bool {
        self.room(id).is_some_and(Room::is_leaf)
    }

    /// Removes and returns the room's evidence. Subsequent calls return `None`.
    pub fn take_evidence(&mut self, id: RoomId) -> Option<Evidence> {
        self.rooms.get_mut(id.0).and_then(|r| r.evidence.take())
    }

    /// Rooms reachable from the root, in pre-order.
    pub fn walk(&self) -> Vec<RoomId> {
        let mut order = Vec::with_capacity(self.rooms.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            let room = &self.rooms[id.0];
            // right first so left is visited first
            stack.extend(room.right);
            stack.extend(room.left);
        }
        order
    }
}

#[derive(Debug, Default)]
pub struct RoomTreeBuilder {
    rooms: Vec<Room>,
    parents: Vec<Option<RoomId>>,
}

impl RoomTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room(&mut self, name: &str) -> RoomId {
        self.push(name, None)
    }

    /// Adds a room holding a clue. An empty clue yields a room without evidence.
    pub fn room_with_clue(&mut self, name: &str, clue: &str, suspect: &str) -> RoomId {
        let evidence = (!clue.is_empty()).then(|| Evidence {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
        });
        self.push(name, evidence)
    }

    fn push(&mut self, name: &str, evidence: Option<Evidence>) -> RoomId {
        let id = RoomId(self.rooms.len());
        self.rooms.push(Room {
            name: name.to_string(),
            evidence,
            left: None,
            right: None,
        });
        self.parents.push(None);
        id
    }

    pub fn link(&mut self, parent: RoomId, side: Side, child: RoomId) -> Result<(), QuestError> {
        for id in [parent, child] {
            if id.0 >= self.rooms.len() {
                return Err(QuestError::UnknownRoom(id));
            }
        }
        if self.rooms[parent.0].child(side).is_some() {
            return Err(QuestError::SlotOccupied { parent, side });
        }
        if self.parents[child.0].is_some() {
            return Err(QuestError::AlreadyLinked(child));
        }

        // child must not be parent itself or one of its ancestors
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(QuestError::WouldCycle { parent, child });
            }
            cursor = self.parents[id.0];
        }

        let slot = match side {
            Side::Left => &mut self.rooms[parent.0].left,
            Side::Right => &mut self.rooms[parent.0].right,
        };
        *slot = Some(child);
        self.parents[child.0] = Some(parent);
        Ok(())
    }

    pub fn build(self, root: RoomId) -> Result<RoomTree, QuestError> {
        if root.0 >= self.rooms.len() {
            return Err(QuestError::UnknownRoom(root));
        }
        if self.parents[root.0].is_some() {
            return Err(QuestError::AlreadyLinked(root));
        }
        // links are acyclic, so a room without a parent other than the root is detached
        let detached = (0..self.rooms.len())
            .map(RoomId)
            .find(|&id| id != root && self.parents[id.0].is_none());
        if let Some(id) = detached {
            return Err(QuestError::Detached(id));
        }
        Ok(RoomTree {
            rooms: self.rooms,
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn mansion_shape() {
        let tree = RoomTree::mansion().unwrap();
        assert_eq!(tree.len(), 7);

        let hall = tree.root();
        assert_eq!(tree.room(hall).unwrap().name, "Entrance Hall");

        let sitting = tree.child(hall, Side::Left).unwrap();
        let kitchen = tree.child(hall, Side::Right).unwrap();
        assert_eq!(tree.room(sitting).unwrap().name, "Sitting Room");
        assert_eq!(tree.room(kitchen).unwrap().name, "Kitchen");

        let library = tree.child(sitting, Side::Left).unwrap();
        assert_eq!(tree.room(library).unwrap().name, "Library");
        assert!(tree.is_leaf(library));
        assert!(!tree.is_leaf(kitchen));

        let bathroom = tree.child(kitchen, Side::Right).unwrap();
        let evidence = tree.room(bathroom).unwrap().evidence().unwrap();
        assert_eq!(evidence.clue, "Empty perfume bottle");
        assert_eq!(evidence.suspect, "Helena");
    }

    #[test]
    fn every_room_reached_exactly_once() {
        let tree = RoomTree::mansion().unwrap();
        let order = tree.walk();
        let unique: HashSet<_> = order.iter().copied().collect();
        assert_eq!(order.len(), tree.len());
        assert_eq!(unique.len(), tree.len());
    }

    #[test]
    fn take_evidence_clears_once() {
        let mut tree = RoomTree::mansion().unwrap();
        let hall = tree.root();
        let evidence = tree.take_evidence(hall).unwrap();
        assert_eq!(evidence.clue, "Key with a strange symbol");
        assert!(tree.take_evidence(hall).is_none());
        assert!(tree.room(hall).unwrap().evidence().is_none());
    }

    #[test]
    fn empty_clue_means_no_evidence() {
        let mut b = RoomTreeBuilder::new();
        let attic = b.room_with_clue("Attic", "", "Nobody");
        let tree = b.build(attic).unwrap();
        assert!(tree.room(attic).unwrap().evidence().is_none());
    }

    #[test]
    fn link_rejects_occupied_slot() {
        let mut b = RoomTreeBuilder::new();
        let a = b.room("A");
        let x = b.room("X");
        let y = b.room("Y");
        b.link(a, Side::Left, x).unwrap();
        assert!(matches!(
            b.link(a, Side::Left, y),
            Err(QuestError::SlotOccupied { side: Side::Left, .. })
        ));
    }

    #[test]
    fn link_rejects_second_parent() {
        let mut b = RoomTreeBuilder::new();
        let a = b.room("A");
        let c = b.room("C");
        let x = b.room("X");
        b.link(a, Side::Left, x).unwrap();
        assert!(matches!(
            b.link(c, Side::Right, x),
            Err(QuestError::AlreadyLinked(id)) if id == x
        ));
    }

    #[test]
    fn link_rejects_cycles() {
        let mut b = RoomTreeBuilder::new();
        let a = b.room("A");
        let x = b.room("X");
        let y = b.room("Y");
        b.link(a, Side::Left, x).unwrap();
        b.link(x, Side::Left, y).unwrap();
        assert!(matches!(
            b.link(y, Side::Right, a),
            Err(QuestError::WouldCycle { .. })
        ));
        assert!(matches!(
            b.link(x, Side::Right, x),
            Err(QuestError::WouldCycle { .. })
        ));
    }

    #[test]
    fn build_rejects_non_root() {
        let mut b = RoomTreeBuilder::new();
        let a = b.room("A");
        let x = b.room("X");
        b.link(a, Side::Left, x).unwrap();
        assert!(b.build(x).is_err());
    }

    #[test]
    fn build_rejects_detached_rooms() {
        let mut b = RoomTreeBuilder::new();
        let a = b.room("A");
        let x = b.room("X");
        let island = b.room("Island");
        let shore = b.room("Shore");
        b.link(a, Side::Left, x).unwrap();
        b.link(island, Side::Right, shore).unwrap();
        assert!(matches!(
            b.build(a),
            Err(QuestError::Detached(id)) if id == island
        ));
    }

    #[test]
    fn len_matches_reachable_rooms() {
        let mut b = RoomTreeBuilder::new();
        let a = b.room("A");
        let x = b.room("X");
        let y = b.room("Y");
        b.link(a, Side::Left, x).unwrap();
        b.link(x, Side::Right, y).unwrap();
        let tree = b.build(a).unwrap();
        assert_eq!(tree.walk().len(), tree.len());
    }

    #[test]
    fn unknown_ids_rejected() {
        let mut b = RoomTreeBuilder::new();
        let a = b.room("A");
        let ghost = RoomId(42);
        assert!(matches!(
            b.link(a, Side::Left, ghost),
            Err(QuestError::UnknownRoom(id)) if id == ghost
        ));
    }
}
