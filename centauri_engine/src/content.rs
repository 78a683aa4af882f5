//! Static narrative tables: room text, object layout, and the ship computer's lines.

use crate::room::ObjectAction;

/// Name of the ship's computer.
pub const CPU_NAME: &str = "GALILEO";

/// Title shown on the title screen.
pub const GAME_TITLE: &str = "CENTAURI";

/// Static content for one room.
#[derive(Debug)]
pub struct RoomSpec {
    pub name: &'static str,
    pub info: &'static str,
    pub danger: &'static str,
    pub color: (u8, u8, u8),
    pub objects: &'static [(&'static str, ObjectAction)],
    pub starts_locked: bool,
    pub fix_eligible: bool,
    pub quick_eligible: bool,
}

/// Every room in declaration order; the index is the room id.
pub const ROOMS: [RoomSpec; 9] = [
    RoomSpec {
        name: "Bridge",
        info: "The room has a single chair and a console at the front. To the left is an open cryopod. \
               To the right is a storage box. Behind is a door.",
        danger: "",
        color: (0, 0, 255),
        objects: &[
            ("console", ObjectAction::Console),
            ("box", ObjectAction::StorageBox),
            ("door", ObjectAction::Door),
        ],
        starts_locked: true,
        fix_eligible: false,
        quick_eligible: false,
    },
    RoomSpec {
        name: "Oxygen Tanks",
        info: "Rows of frosted cylinders line the walls, fed by a squat regulator that ticks like a clock.",
        danger: "The regulator is venting in bursts. Pressure readings jump wildly between tanks.",
        color: (95, 135, 255),
        objects: &[("regulator", ObjectAction::Machinery)],
        starts_locked: false,
        fix_eligible: true,
        quick_eligible: false,
    },
    RoomSpec {
        name: "Terraforming Equipment",
        info: "Crated seeders and soil processors sit strapped to the deck, waiting for a planet that is still years away.",
        danger: "One of the seeders has booted itself and is spraying nutrient gel across the crates.",
        color: (88, 88, 88),
        objects: &[("seeder", ObjectAction::Machinery)],
        starts_locked: false,
        fix_eligible: false,
        quick_eligible: true,
    },
    RoomSpec {
        name: "Food Stores",
        info: "Vacuum-sealed rations are stacked to the ceiling. A walk-in freezer hums in the corner.",
        danger: "The freezer door is frosted shut and its thermostat is climbing.",
        color: (255, 135, 0),
        objects: &[("freezer", ObjectAction::Machinery)],
        starts_locked: false,
        fix_eligible: false,
        quick_eligible: true,
    },
    RoomSpec {
        name: "Reactor",
        info: "A shielded core glows behind thick glass. The air tastes of ozone.",
        danger: "Coolant alarms pulse red. The core's containment field is fluctuating.",
        color: (95, 215, 0),
        objects: &[("core", ObjectAction::Machinery)],
        starts_locked: false,
        fix_eligible: true,
        quick_eligible: false,
    },
    RoomSpec {
        name: "Mainframe",
        info: "Server racks stretch into the dark, lights blinking in patterns that almost look deliberate.",
        danger: "",
        color: (168, 168, 168),
        objects: &[("terminal", ObjectAction::Machinery)],
        starts_locked: false,
        fix_eligible: false,
        quick_eligible: false,
    },
    RoomSpec {
        name: "Escape Pod",
        info: "A single-seat pod sits in its cradle, launch panel dark, hatch half open.",
        danger: "The pod's launch panel is cycling through a countdown nobody started.",
        color: (255, 0, 215),
        objects: &[("panel", ObjectAction::Machinery)],
        starts_locked: false,
        fix_eligible: false,
        quick_eligible: true,
    },
    RoomSpec {
        name: "Left Engine",
        info: "The port thruster assembly fills the room, its housing warm to the touch.",
        danger: "The port thruster is firing in short, uncommanded pulses. The ship is drifting.",
        color: (135, 0, 215),
        objects: &[("thruster", ObjectAction::Machinery)],
        starts_locked: false,
        fix_eligible: true,
        quick_eligible: false,
    },
    RoomSpec {
        name: "Right Engine",
        info: "The starboard thruster assembly, identical to its twin except for a scorched access panel.",
        danger: "The starboard thruster has locked at full burn and the hull is groaning.",
        color: (95, 215, 215),
        objects: &[("thruster", ObjectAction::Machinery)],
        starts_locked: false,
        fix_eligible: true,
        quick_eligible: false,
    },
];

/// Command list shown by the help page, in display order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("?", "Print the help page"),
    ("log", "Read the on-suit log book"),
    ("map", "View the ship maps"),
    ("look", "Look around the room"),
    ("examine", "Interact with an object in the room"),
    ("use", "Use an object from the inventory"),
    ("inventory", "List what you are carrying"),
    ("up", "Move up one room"),
    ("down", "Move down one room"),
    ("left", "Move left one room"),
    ("right", "Move right one room"),
    ("save", "Save the game"),
    ("quit", "Quit the game"),
];

pub const MISSION_HISTORY: &str = "Colony vessel CENTAURI. Crew complement: one captain in cryosleep, one ship's computer. \
    Destination: Proxima Centauri b. Departure was uneventful. Eleven years in, a hull breach woke the captain early.";

pub const NOMINAL: &str = "All readings nominal. Nothing here needs your attention.";

/// Flavor line for a hull breach in the named room.
pub fn breach_text(room_name: &str) -> String {
    format!(
        "A micrometeorite punches through the hull of the {room_name}! Air is screaming out of a hole the size of a fist."
    )
}

/// The ship computer's line when a malfunction is found.
pub fn malfunction_text(room_name: &str) -> String {
    format!(
        "The {room_name} systems are locked behind a rogue encryption layer. You will have to hack your way in."
    )
}
