use rand::seq::SliceRandom;

use crate::store::BestStore;

/// Fixed icon alphabet. A deck takes the first `pair_count()` entries, so the
/// set must stay at least as large as the hardest board's pair count.
pub const ICONS: [&str; 18] = [
    "💾", "⚙️", "🧠", "🤖", "🚀", "💻", "📡", "🌐", "🔥", "⚡", "🎮", "🖥️", "🛸", "💡", "🌀",
    "🎯", "⭐", "🔮",
];

/// How long a mismatched pair stays revealed before it is concealed again.
pub const MISMATCH_HIDE_MS: u64 = 800;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn pair_count(self) -> usize {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Medium => 12,
            Difficulty::Hard => 18,
        }
    }

    /// Board layout as (columns, rows).
    pub fn grid(self) -> (i32, i32) {
        match self {
            Difficulty::Easy => (4, 4),
            Difficulty::Medium => (4, 6),
            Difficulty::Hard => (6, 6),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy (4×4)",
            Difficulty::Medium => "Medium (4×6)",
            Difficulty::Hard => "Hard (6×6)",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub id: u32,
    pub icon: &'static str,
    pub matched: bool,
}

/// What a flip did, so the render surface knows which cards to repaint.
#[derive(Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Input locked, card already matched, or same card picked twice.
    Ignored,
    FirstUp(usize),
    Matched {
        first: usize,
        second: usize,
        won: bool,
    },
    /// Both stay revealed; input stays locked until `conceal_mismatch`.
    Mismatched {
        first: usize,
        second: usize,
    },
}

/// The whole game: deck, selection, move counter and persisted best score.
///
/// Indices passed to `flip` and friends must be in range; the board hands out
/// only indices it got from `cards()`, so anything else is a programming
/// error and panics.
pub struct GameSession {
    cards: Vec<Card>,
    first: Option<usize>,
    second: Option<usize>,
    locked: bool,
    moves: u32,
    best: Option<u32>,
    difficulty: Difficulty,
    generation: u64,
    store: Box<dyn BestStore>,
}

impl GameSession {
    pub fn new(difficulty: Difficulty, store: Box<dyn BestStore>) -> Self {
        let mut session = Self {
            cards: Vec::new(),
            first: None,
            second: None,
            locked: false,
            moves: 0,
            best: store.load(),
            difficulty,
            generation: 0,
            store,
        };
        session.deal();
        session
    }

    /// Two cards per icon with sequential ids, then a uniform shuffle.
    fn deal(&mut self) {
        self.cards.clear();
        for (i, &icon) in ICONS[..self.difficulty.pair_count()].iter().enumerate() {
            let id = i as u32 * 2;
            self.cards.push(Card { id, icon, matched: false });
            self.cards.push(Card { id: id + 1, icon, matched: false });
        }
        let mut rng = rand::rng();
        self.cards.shuffle(&mut rng);
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.locked || self.cards[index].matched || self.first == Some(index) {
            return FlipOutcome::Ignored;
        }

        let Some(first) = self.first else {
            self.first = Some(index);
            return FlipOutcome::FirstUp(index);
        };

        // A completed comparison counts as one move regardless of outcome.
        self.second = Some(index);
        self.moves += 1;
        self.locked = true;

        if self.cards[first].icon == self.cards[index].icon {
            self.cards[first].matched = true;
            self.cards[index].matched = true;
            self.clear_selection();
            let won = self.check_win();
            FlipOutcome::Matched { first, second: index, won }
        } else {
            FlipOutcome::Mismatched { first, second: index }
        }
    }

    /// Deferred mismatch resolution. `generation` is the value captured when
    /// the conceal was scheduled; if the session has been re-dealt since, the
    /// callback is stale and nothing happens.
    pub fn conceal_mismatch(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.second.is_none() {
            return false;
        }
        self.clear_selection();
        true
    }

    fn clear_selection(&mut self) {
        self.first = None;
        self.second = None;
        self.locked = false;
    }

    fn check_win(&mut self) -> bool {
        let won = self.is_won();
        if won && self.best.is_none_or(|best| self.moves < best) {
            self.best = Some(self.moves);
            self.store.save(self.moves);
        }
        won
    }

    /// New shuffle at the current difficulty. Keeps the best score, discards
    /// everything else; bumping the generation invalidates pending conceals.
    pub fn restart(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.moves = 0;
        self.clear_selection();
        self.deal();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.restart();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_face_up(&self, index: usize) -> bool {
        self.cards[index].matched || self.first == Some(index) || self.second == Some(index)
    }

    pub fn is_won(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.matched) && self.moves > 0
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn best(&self) -> Option<u32> {
        self.best
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn locked(&self) -> bool {
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBestStore;

    fn session(difficulty: Difficulty) -> GameSession {
        GameSession::new(difficulty, Box::new(MemoryBestStore::default()))
    }

    fn pair_indices(session: &GameSession, icon: &str) -> (usize, usize) {
        let mut positions = session
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, card)| card.icon == icon)
            .map(|(index, _)| index);
        (positions.next().unwrap(), positions.next().unwrap())
    }

    fn mismatched_indices(session: &GameSession) -> (usize, usize) {
        let icon = session.cards()[0].icon;
        let other = session
            .cards()
            .iter()
            .position(|card| card.icon != icon)
            .unwrap();
        (0, other)
    }

    /// Clears the board by pairing every icon in order.
    fn play_to_win(session: &mut GameSession) {
        let icons: Vec<&str> = session.cards().iter().map(|card| card.icon).collect();
        let mut done: Vec<&str> = Vec::new();
        for icon in icons {
            if done.contains(&icon) {
                continue;
            }
            done.push(icon);
            let (a, b) = pair_indices(session, icon);
            assert!(matches!(session.flip(a), FlipOutcome::FirstUp(_)));
            assert!(matches!(session.flip(b), FlipOutcome::Matched { .. }));
        }
        assert!(session.is_won());
    }

    /// Burns one move on a deliberate mismatch, then resolves it.
    fn burn_a_move(session: &mut GameSession) {
        let (a, b) = mismatched_indices(session);
        assert!(matches!(session.flip(a), FlipOutcome::FirstUp(_)));
        assert!(matches!(session.flip(b), FlipOutcome::Mismatched { .. }));
        assert!(session.conceal_mismatch(session.generation()));
    }

    #[test]
    fn deck_composition_per_difficulty() {
        for (difficulty, len) in [
            (Difficulty::Easy, 16),
            (Difficulty::Medium, 24),
            (Difficulty::Hard, 36),
        ] {
            let session = session(difficulty);
            assert_eq!(session.cards().len(), len);
            for icon in &ICONS[..difficulty.pair_count()] {
                let count = session
                    .cards()
                    .iter()
                    .filter(|card| card.icon == *icon)
                    .count();
                assert_eq!(count, 2, "icon {icon} should appear exactly twice");
            }
            let mut ids: Vec<u32> = session.cards().iter().map(|card| card.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), len, "card ids must be unique");
        }
    }

    #[test]
    fn grid_matches_deck_size() {
        for difficulty in Difficulty::ALL {
            let (cols, rows) = difficulty.grid();
            assert_eq!((cols * rows) as usize, difficulty.pair_count() * 2);
        }
    }

    #[test]
    fn matching_pair_resolves_immediately() {
        let mut session = session(Difficulty::Easy);
        let icon = session.cards()[0].icon;
        let (a, b) = pair_indices(&session, icon);

        assert_eq!(session.flip(a), FlipOutcome::FirstUp(a));
        assert_eq!(session.moves(), 0, "first pick is not a move");
        assert_eq!(
            session.flip(b),
            FlipOutcome::Matched { first: a, second: b, won: false }
        );
        assert_eq!(session.moves(), 1);
        assert!(session.cards()[a].matched);
        assert!(session.cards()[b].matched);
        assert!(!session.locked(), "match unlocks input with no delay");
        assert!(!session.is_face_up(0) || session.cards()[0].matched);
    }

    #[test]
    fn mismatch_stays_revealed_until_concealed() {
        let mut session = session(Difficulty::Easy);
        let (a, b) = mismatched_indices(&session);
        let generation = session.generation();

        session.flip(a);
        assert_eq!(session.flip(b), FlipOutcome::Mismatched { first: a, second: b });
        assert_eq!(session.moves(), 1, "move counted at selection time");
        assert!(session.locked());
        assert!(session.is_face_up(a));
        assert!(session.is_face_up(b));

        // Further input is ignored while the pair is showing.
        let idle = session
            .cards()
            .iter()
            .enumerate()
            .find(|&(index, _)| index != a && index != b)
            .map(|(index, _)| index)
            .unwrap();
        assert_eq!(session.flip(idle), FlipOutcome::Ignored);

        assert!(session.conceal_mismatch(generation));
        assert!(!session.locked());
        assert!(!session.cards()[a].matched);
        assert!(!session.cards()[b].matched);
        assert!(!session.is_face_up(a));
        assert!(!session.is_face_up(b));
        assert_eq!(session.moves(), 1, "resolution does not count again");
    }

    #[test]
    fn flip_guards() {
        let mut session = session(Difficulty::Easy);
        let icon = session.cards()[0].icon;
        let (a, b) = pair_indices(&session, icon);

        session.flip(a);
        assert_eq!(session.flip(a), FlipOutcome::Ignored, "same card twice");
        session.flip(b);
        assert_eq!(session.flip(a), FlipOutcome::Ignored, "matched card");
        assert_eq!(session.flip(b), FlipOutcome::Ignored, "matched card");
    }

    #[test]
    fn conceal_is_a_noop_without_pending_mismatch() {
        let mut session = session(Difficulty::Easy);
        assert!(!session.conceal_mismatch(session.generation()));
        session.flip(0);
        assert!(!session.conceal_mismatch(session.generation()));
        assert!(session.is_face_up(0), "lone selection survives");
    }

    #[test]
    fn stale_conceal_after_restart_is_ignored() {
        let mut session = session(Difficulty::Easy);
        let (a, b) = mismatched_indices(&session);
        let generation = session.generation();
        session.flip(a);
        session.flip(b);

        session.restart();
        assert!(!session.conceal_mismatch(generation));
        assert!(!session.locked());
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn win_records_best_and_only_improves() {
        let store = MemoryBestStore::default();
        let mut session =
            GameSession::new(Difficulty::Easy, Box::new(store.clone()));
        assert_eq!(session.best(), None, "unset until the first win");

        play_to_win(&mut session);
        assert_eq!(session.moves(), 8);
        assert_eq!(session.best(), Some(8));
        assert_eq!(store.get(), Some(8), "best is persisted on win");

        // A slower game leaves the record alone.
        session.restart();
        burn_a_move(&mut session);
        burn_a_move(&mut session);
        play_to_win(&mut session);
        assert_eq!(session.moves(), 10);
        assert_eq!(session.best(), Some(8));
        assert_eq!(store.get(), Some(8));
    }

    #[test]
    fn improved_win_lowers_best() {
        let store = MemoryBestStore::default();
        store.clone().save(10);
        let mut session =
            GameSession::new(Difficulty::Easy, Box::new(store.clone()));
        assert_eq!(session.best(), Some(10), "loaded at startup");

        play_to_win(&mut session);
        assert_eq!(session.best(), Some(8));
        assert_eq!(store.get(), Some(8));
    }

    #[test]
    fn best_survives_a_new_session() {
        let store = MemoryBestStore::default();
        let mut session =
            GameSession::new(Difficulty::Easy, Box::new(store.clone()));
        play_to_win(&mut session);

        let next = GameSession::new(Difficulty::Easy, Box::new(store.clone()));
        assert_eq!(next.best(), Some(8));
    }

    #[test]
    fn restart_resets_everything_but_best() {
        let store = MemoryBestStore::default();
        let mut session =
            GameSession::new(Difficulty::Easy, Box::new(store.clone()));
        play_to_win(&mut session);
        let generation = session.generation();

        session.restart();
        assert_eq!(session.moves(), 0);
        assert!(!session.locked());
        assert!(!session.is_won());
        assert!(session.cards().iter().all(|card| !card.matched));
        assert_eq!(session.best(), Some(8));
        assert_ne!(session.generation(), generation);
    }

    #[test]
    fn difficulty_change_rebuilds_deck_and_keeps_best() {
        let store = MemoryBestStore::default();
        let mut session =
            GameSession::new(Difficulty::Easy, Box::new(store.clone()));
        play_to_win(&mut session);

        session.set_difficulty(Difficulty::Hard);
        assert_eq!(session.difficulty(), Difficulty::Hard);
        assert_eq!(session.cards().len(), 36);
        assert_eq!(session.moves(), 0);
        assert!(!session.locked());
        assert_eq!(session.best(), Some(8));
    }

    #[test]
    fn matched_count_stays_even() {
        let mut session = session(Difficulty::Easy);
        let icons: Vec<&str> = session.cards().iter().map(|card| card.icon).collect();
        let mut done: Vec<&str> = Vec::new();
        for icon in icons {
            if done.contains(&icon) {
                continue;
            }
            done.push(icon);
            let (a, b) = pair_indices(&session, icon);
            session.flip(a);
            let matched = session.cards().iter().filter(|card| card.matched).count();
            assert_eq!(matched % 2, 0);
            session.flip(b);
            let matched = session.cards().iter().filter(|card| card.matched).count();
            assert_eq!(matched % 2, 0);
        }
    }

    #[test]
    fn final_match_reports_win() {
        let mut session = session(Difficulty::Easy);
        let icons: Vec<&str> = session.cards().iter().map(|card| card.icon).collect();
        let mut done: Vec<&str> = Vec::new();
        let mut last_outcome = FlipOutcome::Ignored;
        for icon in icons {
            if done.contains(&icon) {
                continue;
            }
            done.push(icon);
            let (a, b) = pair_indices(&session, icon);
            session.flip(a);
            last_outcome = session.flip(b);
        }
        assert!(matches!(last_outcome, FlipOutcome::Matched { won: true, .. }));
    }
}
