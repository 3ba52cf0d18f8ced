//! Snapshot of the capabilities of the unit being planned for, as reported by the game engine.
use crate::hex::Coords;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Mek,
    Tank,
    Infantry,
    Vtol,
    /// Winged aerospace craft.
    Aerodyne,
    /// Egg-shaped aerospace craft that can hover.
    Spheroid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotiveType {
    Biped,
    Quad,
    Tracked,
    Wheeled,
    Hover,
    Foot,
    Rotor,
    Aerospace,
}

/// State only aerospace units carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AeroState {
    pub current_thrust: u32,
    pub structural_integrity: u32,
    pub velocity: i32,
    pub out_of_control: bool,
    pub can_hover: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    pub id: u32,
    pub kind: UnitKind,
    pub motive: MotiveType,
    pub position: Coords,
    pub facing: u8,
    /// Height above the ground for VTOLs, altitude for aerospace units.
    pub elevation: i32,
    pub max_elevation: i32,
    pub walk_mp: u32,
    pub run_mp: u32,
    pub sprint_mp: u32,
    pub jump_mp: u32,
    pub prone: bool,
    pub hull_down: bool,
    pub can_careful_stand: bool,
    pub can_shift: bool,
    pub tonnage: f64,
    pub amphibious: bool,
    pub can_flee: bool,
    /// Damage the unit can deal to terrain in one turn; zero means it cannot clear terrain.
    pub damage_per_turn: u32,
    pub aero: Option<AeroState>,
}

impl Unit {
    fn base(id: u32, kind: UnitKind, motive: MotiveType, position: Coords, facing: u8) -> Unit {
        Unit {
            id,
            kind,
            motive,
            position,
            facing: facing % 6,
            elevation: 0,
            max_elevation: 0,
            walk_mp: 0,
            run_mp: 0,
            sprint_mp: 0,
            jump_mp: 0,
            prone: false,
            hull_down: false,
            can_careful_stand: false,
            can_shift: false,
            tonnage: 50.0,
            amphibious: false,
            can_flee: false,
            damage_per_turn: 0,
            aero: None,
        }
    }

    /// A biped mek with the usual run = 1.5 x walk.
    pub fn mek(id: u32, position: Coords, facing: u8, walk_mp: u32, jump_mp: u32) -> Unit {
        Unit {
            walk_mp,
            run_mp: (walk_mp * 3).div_ceil(2),
            sprint_mp: walk_mp * 2,
            jump_mp,
            damage_per_turn: 30,
            ..Unit::base(id, UnitKind::Mek, MotiveType::Biped, position, facing)
        }
    }

    pub fn tank(id: u32, motive: MotiveType, position: Coords, facing: u8, cruise_mp: u32) -> Unit {
        Unit {
            walk_mp: cruise_mp,
            run_mp: (cruise_mp * 3).div_ceil(2),
            damage_per_turn: 20,
            ..Unit::base(id, UnitKind::Tank, motive, position, facing)
        }
    }

    pub fn infantry(id: u32, position: Coords, facing: u8, walk_mp: u32, jump_mp: u32) -> Unit {
        Unit {
            walk_mp,
            run_mp: walk_mp,
            jump_mp,
            tonnage: 3.0,
            ..Unit::base(id, UnitKind::Infantry, MotiveType::Foot, position, facing)
        }
    }

    pub fn vtol(id: u32, position: Coords, facing: u8, cruise_mp: u32, elevation: i32) -> Unit {
        Unit {
            walk_mp: cruise_mp,
            run_mp: (cruise_mp * 3).div_ceil(2),
            elevation,
            max_elevation: 10,
            tonnage: 20.0,
            ..Unit::base(id, UnitKind::Vtol, MotiveType::Rotor, position, facing)
        }
    }

    /// An aerospace craft; safe thrust becomes walk MP and max thrust run MP.
    pub fn aerospace(
        id: u32,
        kind: UnitKind,
        position: Coords,
        facing: u8,
        safe_thrust: u32,
        aero: AeroState,
    ) -> Unit {
        Unit {
            walk_mp: safe_thrust,
            run_mp: aero.current_thrust.max(safe_thrust),
            elevation: 5,
            max_elevation: crate::MAX_AERO_ALTITUDE,
            tonnage: 65.0,
            aero: Some(aero),
            ..Unit::base(id, kind, MotiveType::Aerospace, position, facing)
        }
    }

    pub fn is_infantry(&self) -> bool {
        self.kind == UnitKind::Infantry
    }
    pub fn is_tank(&self) -> bool {
        self.kind == UnitKind::Tank
    }
    pub fn is_mek(&self) -> bool {
        self.kind == UnitKind::Mek
    }
    pub fn is_vtol(&self) -> bool {
        self.kind == UnitKind::Vtol
    }
    pub fn is_aero(&self) -> bool {
        matches!(self.kind, UnitKind::Aerodyne | UnitKind::Spheroid)
    }
    pub fn is_aerodyne(&self) -> bool {
        self.kind == UnitKind::Aerodyne
    }
    pub fn is_spheroid(&self) -> bool {
        self.kind == UnitKind::Spheroid
    }

    pub fn velocity(&self) -> i32 {
        self.aero.map_or(0, |a| a.velocity)
    }

    /// Largest level change the unit can make in one step when not jumping.
    pub fn max_climb(&self) -> i32 {
        match self.kind {
            UnitKind::Mek => 2,
            UnitKind::Vtol | UnitKind::Aerodyne | UnitKind::Spheroid => i32::MAX,
            _ => 1,
        }
    }
}
