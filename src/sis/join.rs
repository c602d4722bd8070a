//! Play-by-play reconciliation.
//!
//! Stitches the independently fetched SIS resources into one row per play.
//! Every step is a left join anchored on the play table, so the output has
//! one row per `(gameId, eventId)` of the events feed as long as the lookup
//! tables hold at most one row per key.
//!
//! The steps run in a fixed order because later renames depend on the
//! column names earlier steps leave behind:
//!
//! 1. event-type code → description (`eventType`)
//! 2. offense / defense / home team id → abbreviation
//! 3. play description (`playDesc`)
//! 4. passing, rushing, receiving stats
//! 5. passer / receiver / rusher id → player name

use crate::core::table::Table;


/// Raw SIS resources, concatenated across the fetched seasons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTables {
    pub event_types: Table,
    pub teams: Table,
    pub desc: Table,
    pub passing: Table,
    pub rushing: Table,
    pub receiving: Table,
    pub players: Table,
    pub pbp: Table,
}

/// Columns of the events feed kept by the compact view.
pub const PBP_COLUMNS: [&str; 25] = [
    "season",
    "week",
    "gameId",
    "eventId",
    "eventType",
    "offensiveTeamId",
    "defensiveTeamId",
    "homeTeamId",
    "quarter",
    "timeLeft",
    "down",
    "toGo",
    "startYard",
    "homeTeamScore",
    "awayTeamScore",
    "scoreGap",
    "firstDown",
    "fieldGoal",
    "touchdown",
    "extraPoint",
    "twoPtConversion",
    "twoPtReturn",
    "safety",
    "turnover",
    "yardageNegated",
];

const PLAY_KEY: [&str; 2] = ["gameId", "eventId"];
const ADVANCED_KEY: [&str; 4] = ["season", "week", "gameId", "eventId"];

/// Audit columns every stat feed repeats.
const AUDIT_COLUMNS: [&str; 2] = ["lastUpdate", "scoreType"];

/// Only hit if a provider adds a column that clashes with the curated set.
const CLASH_SUFFIX: &str = "_right";

const TEAM_ROLES: [(&str, &str); 3] = [
    ("offensiveTeamId", "offTeamAbbr"),
    ("defensiveTeamId", "defTeamAbbr"),
    ("homeTeamId", "homeTeamAbbr"),
];

const PLAYER_ROLES: [(&str, &str); 3] = [
    ("qbId", "qbName"),
    ("receiverId", "receiverName"),
    ("rusherId", "rusherName"),
];

const PASSING_RENAMES: [(&str, &str); 2] = [("yards", "passYards"), ("playerId", "qbId")];
const RUSHING_RENAMES: [(&str, &str); 2] = [("yards", "rushYards"), ("playerId", "rusherId")];
const RECEIVING_RENAMES: [(&str, &str); 1] = [("playerId", "receiverId")];

/// Compact play-by-play: curated play columns plus a curated subset of
/// each stat feed.
pub fn build_play_by_play(raw: &RawTables) -> Table {
    let plays = raw.pbp.select(&PBP_COLUMNS);
    let plays = resolve_event_types(plays, &raw.event_types);
    let plays = resolve_teams(plays, &raw.teams);
    let plays = attach_descriptions(plays, &raw.desc);

    let passing = raw.passing.select(&[
        "gameId",
        "eventId",
        "playerId",
        "completed",
        "intercepted",
        "yards",
        "throwDepth",
    ]);
    let rushing = raw
        .rushing
        .select(&["gameId", "eventId", "rpo", "yards", "playerId"]);
    let receiving = raw.receiving.select(&["gameId", "eventId", "playerId"]);

    let plays = plays
        .left_join_on(&passing, &PLAY_KEY, CLASH_SUFFIX)
        .rename(&PASSING_RENAMES)
        .left_join_on(&rushing, &PLAY_KEY, CLASH_SUFFIX)
        .rename(&RUSHING_RENAMES)
        .left_join_on(&receiving, &PLAY_KEY, CLASH_SUFFIX)
        .rename(&RECEIVING_RENAMES);

    resolve_player_names(plays, &raw.players)
}

/// Advanced play-by-play: every column of the events feed and of each stat
/// feed. Overlapping stat columns keep the name of the first feed that
/// brought them in; later feeds get a `Passer`, `Rusher` or `Receiver`
/// suffix.
pub fn build_play_by_play_advanced(raw: &RawTables) -> Table {
    let plays = raw.pbp.clone().drop(&AUDIT_COLUMNS);
    let plays = resolve_event_types(plays, &raw.event_types);
    let plays = resolve_teams(plays, &raw.teams);
    let plays = attach_descriptions(plays, &raw.desc);

    let passing = raw.passing.clone().drop(&AUDIT_COLUMNS);
    let rushing = raw.rushing.clone().drop(&AUDIT_COLUMNS);
    let receiving = raw.receiving.clone().drop(&AUDIT_COLUMNS);

    let plays = plays
        .left_join_on(&passing, &ADVANCED_KEY, "Passer")
        .rename(&PASSING_RENAMES)
        .left_join_on(&rushing, &ADVANCED_KEY, "Rusher")
        .rename(&RUSHING_RENAMES)
        .left_join_on(&receiving, &ADVANCED_KEY, "Receiver")
        .rename(&RECEIVING_RENAMES);

    resolve_player_names(plays, &raw.players)
}

fn resolve_event_types(plays: Table, event_types: &Table) -> Table {
    plays
        .left_join_on(
            &event_types.select(&["eventType", "descr"]),
            &["eventType"],
            CLASH_SUFFIX,
        )
        .drop(&["eventType"])
        .rename(&[("descr", "eventType")])
}

fn resolve_teams(mut plays: Table, teams: &Table) -> Table {
    let lookup = teams.select(&["season", "teamId", "abbr"]);
    for (id_column, abbr_column) in TEAM_ROLES {
        plays = plays
            .left_join(
                &lookup,
                &["season", id_column],
                &["season", "teamId"],
                CLASH_SUFFIX,
            )
            .drop(&[id_column])
            .rename(&[("abbr", abbr_column)]);
    }
    plays
}

fn attach_descriptions(plays: Table, desc: &Table) -> Table {
    plays
        .left_join_on(
            &desc.select(&["gameId", "eventId", "extraNote"]),
            &PLAY_KEY,
            CLASH_SUFFIX,
        )
        .rename(&[("extraNote", "playDesc")])
}

fn resolve_player_names(mut plays: Table, players: &Table) -> Table {
    let lookup = players.select(&["season", "playerId", "fullName"]);
    for (id_column, name_column) in PLAYER_ROLES {
        plays = plays
            .left_join(
                &lookup,
                &["season", id_column],
                &["season", "playerId"],
                CLASH_SUFFIX,
            )
            .drop(&[id_column])
            .rename(&[("fullName", name_column)]);
    }
    plays
}
