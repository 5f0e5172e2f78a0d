use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{APP_DIR_NAME, LEADERBOARD_PAGE_SIZE};
use crate::game::{GameMode, GameState};

const STORE_FILE_NAME: &str = "arena.json";

/// Failures reading or writing the arena file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("arena file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("arena file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a finished score was not recorded.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("sign in to save your score")]
    NotSignedIn,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One ranked leaderboard row.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub id: u64,
    pub username: String,
    pub score: u32,
    pub mode: GameMode,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub rank: usize,
}

/// Lifetime statistics of one signed-in player.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub username: String,
    pub high_score: u32,
    pub games_played: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredScore {
    id: u64,
    username: String,
    score: u32,
    mode: GameMode,
    date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ArenaFile {
    next_id: u64,
    scores: Vec<StoredScore>,
    players: Vec<PlayerProfile>,
}

/// Scores and player profiles, optionally backed by a JSON file.
///
/// Owned by the application and passed by reference to whoever needs it.
#[derive(Debug, Clone)]
pub struct ArenaStore {
    path: Option<PathBuf>,
    data: ArenaFile,
}

/// Returns the platform-correct arena file path.
#[must_use]
pub fn arena_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(STORE_FILE_NAME);
    base
}

impl ArenaStore {
    /// Store that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: ArenaFile::default(),
        }
    }

    /// Opens the store at `path`; a missing file starts an empty arena.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let data = match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => ArenaFile::default(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), scores = data.scores.len(), "arena opened");
        Ok(Self {
            path: Some(path.to_path_buf()),
            data,
        })
    }

    /// Records a score and returns it with its overall rank.
    ///
    /// The rank counts every stored score strictly higher, in any mode. The
    /// in-memory arena only changes once the file write succeeded.
    pub fn submit_score(
        &mut self,
        username: &str,
        score: u32,
        mode: GameMode,
        date: NaiveDate,
    ) -> Result<LeaderboardEntry, StoreError> {
        let mut next = self.data.clone();
        let id = next.next_id + 1;
        next.next_id = id;
        next.scores.push(StoredScore {
            id,
            username: username.to_owned(),
            score,
            mode,
            date,
        });
        next.record_game(username, score);

        let rank = 1 + next
            .scores
            .iter()
            .filter(|stored| stored.score > score)
            .count();

        self.write(&next)?;
        self.data = next;
        info!(username, score, %mode, rank, "score submitted");

        Ok(LeaderboardEntry {
            id,
            username: username.to_owned(),
            score,
            mode,
            date,
            rank,
        })
    }

    /// Returns the top page of scores, best first.
    ///
    /// Equal scores keep submission order; ranks run 1..=N without gaps.
    #[must_use]
    pub fn leaderboard(&self, mode: Option<GameMode>) -> Vec<LeaderboardEntry> {
        let mut scores: Vec<&StoredScore> = self
            .data
            .scores
            .iter()
            .filter(|stored| mode.is_none_or(|mode| stored.mode == mode))
            .collect();
        scores.sort_by(|a, b| b.score.cmp(&a.score));

        scores
            .into_iter()
            .take(LEADERBOARD_PAGE_SIZE)
            .enumerate()
            .map(|(index, stored)| LeaderboardEntry {
                id: stored.id,
                username: stored.username.clone(),
                score: stored.score,
                mode: stored.mode,
                date: stored.date,
                rank: index + 1,
            })
            .collect()
    }

    #[must_use]
    pub fn profile(&self, username: &str) -> Option<&PlayerProfile> {
        self.data
            .players
            .iter()
            .find(|profile| profile.username == username)
    }

    fn write(&self, data: &ArenaFile) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl ArenaFile {
    fn record_game(&mut self, username: &str, score: u32) {
        if let Some(profile) = self
            .players
            .iter_mut()
            .find(|profile| profile.username == username)
        {
            profile.games_played += 1;
            profile.high_score = profile.high_score.max(score);
            return;
        }

        self.players.push(PlayerProfile {
            username: username.to_owned(),
            high_score: score,
            games_played: 1,
        });
    }
}

/// Hands a finished run to the store.
///
/// Runs that are still going or ended with zero points are skipped
/// (`Ok(None)`); guests get [`SubmitError::NotSignedIn`].
pub fn submit_final_score(
    store: &mut ArenaStore,
    username: Option<&str>,
    state: &GameState,
    date: NaiveDate,
) -> Result<Option<LeaderboardEntry>, SubmitError> {
    if !state.status.is_finished() || state.score == 0 {
        return Ok(None);
    }

    let username = username.ok_or(SubmitError::NotSignedIn)?;
    let entry = store.submit_score(username, state.score, state.mode, date)?;
    Ok(Some(entry))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use chrono::NaiveDate;

    use super::{submit_final_score, ArenaStore, StoreError, SubmitError};
    use crate::config::GridSize;
    use crate::game::{GameMode, GameState, GameStatus};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 25).expect("valid date")
    }

    #[test]
    fn leaderboard_is_sorted_and_densely_ranked() {
        let mut store = ArenaStore::in_memory();
        store
            .submit_score("RetroGamer", 850, GameMode::Walls, day())
            .expect("in-memory submit");
        store
            .submit_score("PixelMaster", 1250, GameMode::Walls, day())
            .expect("in-memory submit");
        store
            .submit_score("NeonNinja", 980, GameMode::Wrap, day())
            .expect("in-memory submit");

        let all = store.leaderboard(None);
        let names: Vec<_> = all.iter().map(|entry| entry.username.as_str()).collect();
        let ranks: Vec<_> = all.iter().map(|entry| entry.rank).collect();

        assert_eq!(names, vec!["PixelMaster", "NeonNinja", "RetroGamer"]);
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn mode_filter_and_page_size_apply() {
        let mut store = ArenaStore::in_memory();
        for score in 1..=15 {
            store
                .submit_score("walls", score * 10, GameMode::Walls, day())
                .expect("in-memory submit");
        }
        store
            .submit_score("wrap", 990, GameMode::Wrap, day())
            .expect("in-memory submit");

        let walls = store.leaderboard(Some(GameMode::Walls));
        assert_eq!(walls.len(), 10);
        assert!(walls.iter().all(|entry| entry.mode == GameMode::Walls));
        assert_eq!(walls[0].score, 150);
        assert_eq!(walls[9].score, 60);

        let wrap = store.leaderboard(Some(GameMode::Wrap));
        assert_eq!(wrap.len(), 1);
        assert_eq!(wrap[0].rank, 1);
    }

    #[test]
    fn ties_keep_submission_order() {
        let mut store = ArenaStore::in_memory();
        store
            .submit_score("first", 100, GameMode::Walls, day())
            .expect("in-memory submit");
        store
            .submit_score("second", 100, GameMode::Walls, day())
            .expect("in-memory submit");

        let board = store.leaderboard(None);

        assert_eq!(board[0].username, "first");
        assert_eq!(board[1].username, "second");
        assert_eq!(board[1].rank, 2);
    }

    #[test]
    fn submission_rank_counts_higher_scores() {
        let mut store = ArenaStore::in_memory();
        store
            .submit_score("a", 500, GameMode::Walls, day())
            .expect("in-memory submit");
        store
            .submit_score("b", 300, GameMode::Wrap, day())
            .expect("in-memory submit");

        let entry = store
            .submit_score("c", 400, GameMode::Walls, day())
            .expect("in-memory submit");

        assert_eq!(entry.rank, 2);
        assert_eq!(entry.date.to_string(), "2024-11-25");
    }

    #[test]
    fn profiles_track_best_score_and_game_count() {
        let mut store = ArenaStore::in_memory();
        store
            .submit_score("NeonNinja", 300, GameMode::Walls, day())
            .expect("in-memory submit");
        store
            .submit_score("NeonNinja", 120, GameMode::Wrap, day())
            .expect("in-memory submit");

        let profile = store.profile("NeonNinja").expect("profile exists");
        assert_eq!(profile.high_score, 300);
        assert_eq!(profile.games_played, 2);
        assert!(store.profile("nobody").is_none());
    }

    #[test]
    fn final_score_submission_is_gated() {
        let mut store = ArenaStore::in_memory();
        let mut state = GameState::initial(GameMode::Wrap, GridSize::square(20));
        state.status = GameStatus::GameOver;

        let nothing = submit_final_score(&mut store, Some("u"), &state, day());
        assert!(matches!(nothing, Ok(None)));

        state.score = 70;
        let guest = submit_final_score(&mut store, None, &state, day());
        assert!(matches!(guest, Err(SubmitError::NotSignedIn)));
        assert!(store.leaderboard(None).is_empty());

        let entry = submit_final_score(&mut store, Some("u"), &state, day())
            .expect("submission succeeds")
            .expect("score is recorded");
        assert_eq!(entry.score, 70);
        assert_eq!(entry.mode, GameMode::Wrap);
    }

    #[test]
    fn arena_file_round_trip() {
        let path = unique_test_path("round_trip");
        {
            let mut store = ArenaStore::open(&path).expect("missing file opens empty");
            store
                .submit_score("PixelMaster", 1250, GameMode::Walls, day())
                .expect("file submit");
        }

        let reopened = ArenaStore::open(&path).expect("saved file opens");
        let board = reopened.leaderboard(None);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].username, "PixelMaster");
        cleanup_test_path(&path);
    }

    #[test]
    fn failed_write_leaves_the_arena_untouched() {
        let path = unique_test_path("blocked");
        fs::create_dir_all(&path).expect("blocking directory should be creatable");
        let mut store = ArenaStore::open(&path.join("arena.json"))
            .expect("missing file opens empty");
        store
            .submit_score("NeonNinja", 300, GameMode::Walls, day())
            .expect("first write succeeds");

        // Replace the arena file with a directory so the next write fails.
        fs::remove_file(path.join("arena.json")).expect("arena file exists");
        fs::create_dir(path.join("arena.json")).expect("directory should be creatable");

        for _ in 0..2 {
            let result = store.submit_score("NeonNinja", 900, GameMode::Wrap, day());
            assert!(matches!(result, Err(StoreError::Io(_))));
        }

        let board = store.leaderboard(None);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].score, 300);
        let profile = store.profile("NeonNinja").expect("profile exists");
        assert_eq!(profile.high_score, 300);
        assert_eq!(profile.games_played, 1);

        fs::remove_dir(path.join("arena.json")).expect("blocking directory exists");
        let entry = store
            .submit_score("NeonNinja", 900, GameMode::Wrap, day())
            .expect("write succeeds again");
        assert_eq!(entry.id, 2);
        assert_eq!(store.leaderboard(None).len(), 2);

        let _ = fs::remove_dir_all(&path);
    }

    #[test]
    fn malformed_arena_file_returns_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(ArenaStore::open(&path).is_err());
        cleanup_test_path(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("snake-arena-store-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
