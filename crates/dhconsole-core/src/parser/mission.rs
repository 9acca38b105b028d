use crate::model::MissionTree;
use once_cell::sync::Lazy;
use regex::Regex;

/// Separators accepted between sub mission ids.
///
/// Current server builds join ids with the ideographic comma; older builds
/// used a plain comma. Neither can appear inside a decimal id.
pub const MISSION_ID_DELIMITERS: [char; 2] = ['、', ','];

const MAIN_TASK_MARKER: &str = "Main task";
const STUCK_TASKS_SENTINEL: &str = "Possibly stuck tasks";

static MAIN_TASK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Main task (\d+)").expect("main task pattern"));

/// Parses the `mission running` listing into main mission → sub missions.
///
/// The first line is a header and is always skipped. A `Main task N` line opens
/// a bucket; following lines contribute sub mission ids to it. The scan stops at
/// the `Possibly stuck tasks` sentinel.
pub fn parse_mission_tree(text: &str) -> MissionTree {
    let mut tree = MissionTree::new();
    let mut current = None;

    for line in text.lines().skip(1) {
        if line.contains(STUCK_TASKS_SENTINEL) {
            break;
        }
        if line.contains(MAIN_TASK_MARKER) {
            if let Some(id) = MAIN_TASK
                .captures(line)
                .and_then(|captures| captures[1].parse().ok())
            {
                tree.entry(id).or_default();
                current = Some(id);
            }
            continue;
        }
        let Some(main_id) = current else {
            continue;
        };
        let ids = line
            .split(MISSION_ID_DELIMITERS)
            .filter_map(|token| token.trim().parse::<u32>().ok());
        tree.entry(main_id).or_default().extend(ids);
    }

    tree
}
