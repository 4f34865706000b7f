//! Counters that outlive a single level load.

/// Which counters survive a level reload. Deaths always survive in practice;
/// the flag exists so every counter is handled the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadPolicy {
    pub preserve_loot: bool,
    pub preserve_deaths: bool,
    pub preserve_key: bool,
}

impl ReloadPolicy {
    /// First load from the instruction screen.
    pub const NEW_GAME: Self = Self {
        preserve_loot: false,
        preserve_deaths: true,
        preserve_key: false,
    };
    /// Reload after touching a hazard: loot collected this attempt is lost.
    pub const AFTER_DEATH: Self = Self {
        preserve_loot: false,
        preserve_deaths: true,
        preserve_key: false,
    };
    /// Reload through the exit or a manual retry.
    pub const CONTINUE: Self = Self {
        preserve_loot: true,
        preserve_deaths: true,
        preserve_key: false,
    };
}

/// Player progress across reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub loot: u32,
    pub deaths: u32,
    /// Always 0 or 1.
    pub key: u32,
    /// Always ≥ 1.
    pub level: u32,
}

impl SessionState {
    pub fn new(first_level: u32) -> Self {
        Self {
            loot: 0,
            deaths: 0,
            key: 0,
            level: first_level.max(1),
        }
    }

    /// Reset the counters `policy` does not preserve.
    pub fn apply(&mut self, policy: ReloadPolicy) {
        if !policy.preserve_loot {
            self.loot = 0;
        }
        if !policy.preserve_deaths {
            self.deaths = 0;
        }
        if !policy.preserve_key {
            self.key = 0;
        }
    }

    pub fn collect_loot(&mut self) {
        self.loot += 1;
    }

    /// Saturates at one key.
    pub fn collect_key(&mut self) {
        self.key = (self.key + 1).min(1);
    }

    pub fn record_death(&mut self) {
        self.deaths += 1;
    }

    pub fn has_key(&self) -> bool {
        self.key == 1
    }

    /// Use the exit. With a key the level advances and the key is spent.
    /// A level that reaches `end_level` is pulled back by one when
    /// `hold_final_level` is set. Returns the level to load next.
    pub fn take_exit(&mut self, end_level: u32, hold_final_level: bool) -> u32 {
        if self.has_key() {
            self.level += 1;
            self.key = 0;
        }
        if hold_final_level && self.level >= end_level && self.level > 1 {
            self.level -= 1;
        }
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exit_without_key_stays() {
        let mut s = SessionState::new(1);
        assert_eq!(s.take_exit(4, true), 1);
        assert_eq!(s.key, 0);
    }

    #[test]
    fn exit_with_key_advances_and_spends_it() {
        let mut s = SessionState::new(1);
        s.collect_key();
        assert_eq!(s.take_exit(4, true), 2);
        assert_eq!(s.key, 0);
    }

    #[test]
    fn final_exit_is_held() {
        let mut s = SessionState::new(3);
        s.collect_key();
        assert_eq!(s.take_exit(4, true), 3);
        assert_eq!(s.key, 0);
    }

    #[test]
    fn final_exit_can_end_the_game() {
        let mut s = SessionState::new(3);
        s.collect_key();
        assert_eq!(s.take_exit(4, false), 4);
    }

    #[test]
    fn policies() {
        let mut s = SessionState { loot: 4, deaths: 2, key: 1, level: 2 };
        s.apply(ReloadPolicy::CONTINUE);
        assert_eq!((s.loot, s.deaths, s.key), (4, 2, 0));

        s.key = 1;
        s.apply(ReloadPolicy::AFTER_DEATH);
        assert_eq!((s.loot, s.deaths, s.key), (0, 2, 0));

        s.loot = 3;
        s.apply(ReloadPolicy::NEW_GAME);
        assert_eq!((s.loot, s.deaths), (0, 2));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Loot,
        Key,
        Death,
        Exit,
        Reload(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Loot),
            Just(Op::Key),
            Just(Op::Death),
            Just(Op::Exit),
            (0u8..3).prop_map(Op::Reload),
        ]
    }

    proptest! {
        #[test]
        fn counters_stay_in_range(ops in proptest::collection::vec(op(), 0..200)) {
            let mut s = SessionState::new(1);
            let mut deaths_seen = 0;
            for op in ops {
                let before = s;
                match op {
                    Op::Loot => s.collect_loot(),
                    Op::Key => s.collect_key(),
                    Op::Death => s.record_death(),
                    Op::Exit => {
                        s.take_exit(4, true);
                        if before.key == 0 {
                            prop_assert_eq!(s.level, before.level);
                        }
                    }
                    Op::Reload(n) => s.apply(match n {
                        0 => ReloadPolicy::NEW_GAME,
                        1 => ReloadPolicy::AFTER_DEATH,
                        _ => ReloadPolicy::CONTINUE,
                    }),
                }
                prop_assert!(s.key <= 1);
                prop_assert!(s.level >= 1 && s.level < 4);
                prop_assert!(s.deaths >= deaths_seen);
                deaths_seen = s.deaths;
            }
        }
    }
}
