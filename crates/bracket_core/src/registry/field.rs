//! The 2025 tournament field: team → (seed, region).
//!
//! 68 teams; four (region, seed) slots hold two teams each and are decided
//! by First Four play-in games.

use serde::{Deserialize, Serialize};

use crate::models::Region;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub team: String,
    pub seed: u8,
    pub region: Region,
}

const FIELD_2025: &[(&str, u8, Region)] = &[
    // South
    ("Auburn", 1, Region::South),
    ("Alabama St.", 16, Region::South),
    ("Saint Francis", 16, Region::South),
    ("Louisville", 8, Region::South),
    ("Creighton", 9, Region::South),
    ("Michigan", 5, Region::South),
    ("UC San Diego", 12, Region::South),
    ("Texas A&M", 4, Region::South),
    ("Yale", 13, Region::South),
    ("Mississippi", 6, Region::South),
    ("San Diego St.", 11, Region::South),
    ("North Carolina", 11, Region::South),
    ("Iowa St.", 3, Region::South),
    ("Lipscomb", 14, Region::South),
    ("Marquette", 7, Region::South),
    ("New Mexico", 10, Region::South),
    ("Michigan St.", 2, Region::South),
    ("Bryant", 15, Region::South),
    // West
    ("Florida", 1, Region::West),
    ("Norfolk St.", 16, Region::West),
    ("Connecticut", 8, Region::West),
    ("Oklahoma", 9, Region::West),
    ("Memphis", 5, Region::West),
    ("Colorado St.", 12, Region::West),
    ("Maryland", 4, Region::West),
    ("Grand Canyon", 13, Region::West),
    ("Missouri", 6, Region::West),
    ("Drake", 11, Region::West),
    ("Texas Tech", 3, Region::West),
    ("UNC Wilmington", 14, Region::West),
    ("Kansas", 7, Region::West),
    ("Arkansas", 10, Region::West),
    ("St. John's", 2, Region::West),
    ("Nebraska Omaha", 15, Region::West),
    // East
    ("Duke", 1, Region::East),
    ("American", 16, Region::East),
    ("Mount St. Mary's", 16, Region::East),
    ("Mississippi St.", 8, Region::East),
    ("Baylor", 9, Region::East),
    ("Oregon", 5, Region::East),
    ("Liberty", 12, Region::East),
    ("Arizona", 4, Region::East),
    ("Akron", 13, Region::East),
    ("BYU", 6, Region::East),
    ("VCU", 11, Region::East),
    ("Wisconsin", 3, Region::East),
    ("Montana", 14, Region::East),
    ("Saint Mary's", 7, Region::East),
    ("Vanderbilt", 10, Region::East),
    ("Alabama", 2, Region::East),
    ("Robert Morris", 15, Region::East),
    // Midwest
    ("Houston", 1, Region::Midwest),
    ("SIU Edwardsville", 16, Region::Midwest),
    ("Gonzaga", 8, Region::Midwest),
    ("Georgia", 9, Region::Midwest),
    ("Clemson", 5, Region::Midwest),
    ("McNeese St.", 12, Region::Midwest),
    ("Purdue", 4, Region::Midwest),
    ("High Point", 13, Region::Midwest),
    ("Illinois", 6, Region::Midwest),
    ("Texas", 11, Region::Midwest),
    ("Xavier", 11, Region::Midwest),
    ("Kentucky", 3, Region::Midwest),
    ("Troy", 14, Region::Midwest),
    ("UCLA", 7, Region::Midwest),
    ("Utah St.", 10, Region::Midwest),
    ("Tennessee", 2, Region::Midwest),
    ("Wofford", 15, Region::Midwest),
];

/// Embedded 2025 field, in listing order.
pub fn default_field() -> Vec<FieldEntry> {
    FIELD_2025
        .iter()
        .map(|&(team, seed, region)| FieldEntry { team: team.to_string(), seed, region })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_default_field_shape() {
        let field = default_field();
        assert_eq!(field.len(), 68);

        let names: HashSet<_> = field.iter().map(|e| e.team.as_str()).collect();
        assert_eq!(names.len(), 68, "team names must be unique");

        let mut per_slot: HashMap<(Region, u8), usize> = HashMap::new();
        for entry in &field {
            *per_slot.entry((entry.region, entry.seed)).or_default() += 1;
        }
        assert_eq!(per_slot.len(), 64);
        let play_ins = per_slot.values().filter(|&&n| n == 2).count();
        assert_eq!(play_ins, 4);
    }
}
