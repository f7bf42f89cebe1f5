mod legacy;
pub mod roster_file;

pub use roster_file::{
    export_roster, load_roster, load_roster_or_seed, parse_roster, save_roster,
};
