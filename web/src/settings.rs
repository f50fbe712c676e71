use clap::{Args, ValueEnum};
use pocket_arcade_core as arcade;
use yew::prelude::*;

/// Start-up options for the minesweeper board, parsed from the URL fragment.
#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct BoardSettings {
    /// Side of the square board
    #[arg(long, default_value_t = arcade::BOARD_SIDE)]
    pub side: arcade::Coord,

    /// Mines placed on the board
    #[arg(long, default_value_t = arcade::DEFAULT_MINES)]
    pub mines: arcade::CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl BoardSettings {
    pub(crate) fn board_config(&self) -> arcade::BoardConfig {
        arcade::BoardConfig::square(self.side, self.mines)
    }
}

/// Start-up options for the click test.
#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct ClickSettings {
    /// Countdown length in seconds for time mode
    #[arg(long, default_value_t = arcade::DEFAULT_TIME_LIMIT)]
    pub time_limit: u32,

    /// Clicks needed to finish in clicks mode
    #[arg(long, default_value_t = arcade::DEFAULT_CLICK_TARGET)]
    pub click_target: u32,

    /// How many past results to keep
    #[arg(long, default_value_t = arcade::DEFAULT_HISTORY_LEN)]
    pub history_len: usize,
}

impl ClickSettings {
    pub(crate) fn click_test_config(&self) -> arcade::ClickTestConfig {
        arcade::ClickTestConfig::new(self.time_limit, self.click_target, self.history_len)
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Screen {
    #[default]
    Minesweeper,
    ClickTest,
}

impl Screen {
    pub(crate) const fn title(self) -> &'static str {
        match self {
            Self::Minesweeper => "Minesweeper",
            Self::ClickTest => "Click Test",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestArgs {
        #[command(flatten)]
        board: BoardSettings,

        #[command(flatten)]
        clicks: ClickSettings,

        #[arg(long, value_enum, default_value_t)]
        start: Screen,
    }

    #[test]
    fn empty_fragment_gives_defaults() {
        let args = TestArgs::try_parse_from([""]).unwrap();

        assert_eq!(args.board.board_config(), arcade::BoardConfig::default());
        assert_eq!(args.board.seed, None);
        assert_eq!(args.clicks.click_test_config(), arcade::ClickTestConfig::default());
        assert_eq!(args.start, Screen::Minesweeper);
    }

    #[test]
    fn fragment_options_override_defaults() {
        let fragment = "#--mines=30&--seed=7&--click-target=20&--start=click-test";
        let args = TestArgs::try_parse_from(fragment.split(['#', '&'])).unwrap();

        assert_eq!(args.board.board_config().mines, 30);
        assert_eq!(args.board.seed, Some(7));
        assert_eq!(args.clicks.click_test_config().click_target, 20);
        assert_eq!(args.start, Screen::ClickTest);
    }

    #[test]
    fn oversized_mine_count_is_clamped() {
        let fragment = "#--side=3&--mines=50";
        let args = TestArgs::try_parse_from(fragment.split(['#', '&'])).unwrap();

        assert_eq!(args.board.board_config().mines, 9);
    }
}
