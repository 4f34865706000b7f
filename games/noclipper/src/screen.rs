/// Which view is active. The game starts on `Instruction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Instruction,
    Game,
    End,
    /// Terminal: the front-end should close; all input is ignored.
    Closed,
}

impl Screen {
    /// Numeric id sent with screen events.
    pub fn id(self) -> u32 {
        match self {
            Screen::Instruction => 0,
            Screen::Game => 1,
            Screen::End => 2,
            Screen::Closed => 3,
        }
    }

    /// Screen after a pointer press, if the press changes anything.
    pub fn on_click(self) -> Option<Screen> {
        match self {
            Screen::Instruction => Some(Screen::Game),
            Screen::End => Some(Screen::Closed),
            Screen::Game | Screen::Closed => None,
        }
    }

    /// Screen after a quit request. Only gameplay listens for quit keys.
    pub fn on_quit(self) -> Option<Screen> {
        match self {
            Screen::Game => Some(Screen::Closed),
            _ => None,
        }
    }

    /// Screen after setup was asked for a level past the last map.
    pub fn on_level_complete(self) -> Option<Screen> {
        match self {
            Screen::Game => Some(Screen::End),
            _ => None,
        }
    }

    pub fn accepts_input(self) -> bool {
        self != Screen::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_path_to_closed() {
        let s = Screen::default();
        let s = s.on_click().unwrap();
        assert_eq!(s, Screen::Game);
        let s = s.on_level_complete().unwrap();
        assert_eq!(s, Screen::End);
        let s = s.on_click().unwrap();
        assert_eq!(s, Screen::Closed);
        assert!(!s.accepts_input());
    }

    #[test]
    fn clicks_during_play_do_nothing() {
        assert_eq!(Screen::Game.on_click(), None);
        assert_eq!(Screen::Closed.on_click(), None);
    }

    #[test]
    fn quit_only_from_gameplay() {
        assert_eq!(Screen::Game.on_quit(), Some(Screen::Closed));
        assert_eq!(Screen::Instruction.on_quit(), None);
        assert_eq!(Screen::End.on_quit(), None);
    }

    #[test]
    fn ids_are_distinct() {
        let ids = [Screen::Instruction, Screen::Game, Screen::End, Screen::Closed].map(Screen::id);
        assert_eq!(ids, [0, 1, 2, 3]);
    }
}
