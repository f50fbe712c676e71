use crate::settings::BoardSettings;
use crate::utils::*;
use bitflags::bitflags;
use pocket_arcade_core as arcade;
use arcade::LayoutGenerator;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    TriggeredMine,
}

impl ViewCellState {
    fn of(board: &arcade::Board, coords: arcade::Coord2) -> Self {
        let cell = board.cell_at(coords);
        match (cell.is_revealed(), cell.is_mine(), cell.is_flagged()) {
            (true, true, _) if board.triggered_mine() == Some(coords) => Self::TriggeredMine,
            (true, true, _) => Self::Mine,
            (true, false, _) => Self::Revealed(cell.neighbor_mines()),
            (false, _, true) => Self::Flagged,
            (false, _, false) => Self::Hidden,
        }
    }

    fn content(self) -> String {
        use ViewCellState::*;
        match self {
            Hidden | Revealed(0) => String::new(),
            Flagged => "🚩".to_string(),
            Mine | TriggeredMine => "💣".to_string(),
            Revealed(count) => count.to_string(),
        }
    }

    fn classes(self) -> Classes {
        use ViewCellState::*;
        match self {
            Hidden => classes!(),
            Flagged => classes!("flag"),
            Revealed(count) => classes!("open", format!("num-{}", count)),
            Mine => classes!("open", "mine"),
            TriggeredMine => classes!("open", "mine", "oops"),
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CellPointerState {
    pos: arcade::Coord2,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Update(CellPointerState),
    Leave,
}

/// Move to make once every held button is released over a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
enum CellAction {
    Reveal,
    Flag,
}

/// Resolves the pointer state held just before release into a move.
///
/// Only a lone left or right button makes a move, any chord cancels it.
fn release_action(held: Option<CellPointerState>) -> Option<(arcade::Coord2, CellAction)> {
    let CellPointerState { pos, buttons } = held?;
    match buttons {
        MouseButtons::LEFT => Some((pos, CellAction::Reveal)),
        MouseButtons::RIGHT => Some((pos, CellAction::Flag)),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    pos: arcade::Coord2,
    cell_state: ViewCellState,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        pos,
        cell_state,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!("cell", cell_state.classes());
    if pressed {
        class.push("open");
    }

    let pointer_update = |event: &'static str| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(CellMsg::Update(CellPointerState { pos, buttons }));
            log::trace!("{:?} mouse {} ({:?})", pos, event, buttons);
        })
    };
    let onmousedown = pointer_update("down");
    let onmouseup = pointer_update("up");
    let onmouseenter = pointer_update("enter");

    let onmouseleave = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            callback.emit(CellMsg::Leave);
            log::trace!("{:?} mouse leave", pos);
        })
    };

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseenter} {onmouseleave}>{cell_state.content()}</td>
    }
}

#[derive(Debug)]
pub(crate) struct MinesweeperView {
    board: arcade::Board,
    seed: u64,
    current_cell_state: Option<CellPointerState>,
}

impl MinesweeperView {
    fn create_board(config: arcade::BoardConfig, seed: u64) -> arcade::Board {
        log::debug!("new board {:?} with seed {}", config, seed);
        arcade::RejectionSampler::new(seed).generate(config)
    }

    fn next_seed(&self, settings: &BoardSettings) -> u64 {
        match settings.seed {
            // keep forced seeds reproducible across new games
            Some(_) => self.seed.wrapping_add(1),
            None => js_random_seed(),
        }
    }

    fn game_state_class(&self) -> &'static str {
        use arcade::BoardState::*;
        match self.board.state() {
            Playing if self.is_mid_reveal() => "mid-open",
            Playing => "in-progress",
            Won => "win",
            Lost => "lose",
        }
    }

    fn is_mid_reveal(&self) -> bool {
        matches!(
            self.current_cell_state,
            Some(CellPointerState {
                buttons: MouseButtons::LEFT,
                ..
            })
        )
    }

    fn is_pressed(&self, coords: arcade::Coord2, cell_state: ViewCellState) -> bool {
        !self.board.is_finished()
            && cell_state == ViewCellState::Hidden
            && matches!(
                self.current_cell_state,
                Some(CellPointerState {
                    pos,
                    buttons: MouseButtons::LEFT,
                }) if pos == coords
            )
    }

    fn reveal_cell(&mut self, coords: arcade::Coord2) -> bool {
        self.board.reveal(coords).has_update()
    }

    fn flag_cell(&mut self, coords: arcade::Coord2) -> bool {
        self.board.toggle_flag(coords).has_update()
    }
}

impl Component for MinesweeperView {
    type Message = Msg;
    type Properties = BoardSettings;

    fn create(ctx: &Context<Self>) -> Self {
        let settings = ctx.props();
        let seed = settings.seed.unwrap_or_else(js_random_seed);
        Self {
            board: Self::create_board(settings.board_config(), seed),
            seed,
            current_cell_state: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Leave) => {
                log::trace!("cell leave");
                self.current_cell_state.take().is_some()
            }
            CellEvent(Update(cell_state)) => {
                log::trace!("cell update: {:?}", cell_state);
                if cell_state.buttons.is_empty() {
                    // all buttons were released, act on whichever was held
                    let held = self.current_cell_state.take();
                    match release_action(held) {
                        Some((pos, CellAction::Reveal)) => {
                            log::debug!("reveal cell: {:?}", pos);
                            self.reveal_cell(pos);
                        }
                        Some((pos, CellAction::Flag)) => {
                            log::debug!("flag cell: {:?}", pos);
                            self.flag_cell(pos);
                        }
                        None => {}
                    }
                    held.is_some()
                } else {
                    match self.current_cell_state.replace(cell_state) {
                        None => true,
                        Some(previous) => previous != cell_state,
                    }
                }
            }
            NewGame => {
                self.seed = self.next_seed(ctx.props());
                self.board = Self::create_board(ctx.props().board_config(), self.seed);
                self.current_cell_state = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use arcade::BoardState::*;

        let (rows, cols) = self.board.size();
        let mines_left = format_for_counter(self.board.mines_left() as i32);
        let flags = self.board.flagged_count();
        let is_playable = !self.board.is_finished();
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });
        let status = match self.board.state() {
            Playing => html! {},
            Won => html! { <p class="status win">{"You Won!"}</p> },
            Lost => html! { <p class="status lose">{"Game Over!"}</p> },
        };

        html! {
            <section class="minesweeper" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside title="Mines left">{mines_left}</aside>
                    <span><button class={self.game_state_class()} onclick={cb_new_game} title="New Game"/></span>
                    <aside title="Flags">{format_for_counter(flags.into())}</aside>
                </nav>
                {status}
                <table class={classes!(is_playable.then_some("playable"))}>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let pos = (row, col);
                                        let cell_state = ViewCellState::of(&self.board, pos);
                                        let pressed = self.is_pressed(pos, cell_state);
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellView {pos} {cell_state} {callback} {pressed}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                <small>{"Left click to reveal • Right click to flag"}</small>
            </section>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: arcade::Coord2, mines: &[arcade::Coord2]) -> arcade::Board {
        arcade::Board::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn lost_board_maps_triggered_mine_and_other_mines() {
        let mut board = board((2, 2), &[(0, 0), (0, 1)]);
        board.toggle_flag((0, 1)).unwrap();
        board.reveal((1, 1)).unwrap();
        board.reveal((0, 0)).unwrap();

        assert_eq!(ViewCellState::of(&board, (0, 0)), ViewCellState::TriggeredMine);
        assert_eq!(ViewCellState::of(&board, (0, 1)), ViewCellState::Mine);
        assert_eq!(ViewCellState::of(&board, (1, 1)), ViewCellState::Revealed(2));
        assert_eq!(ViewCellState::of(&board, (1, 0)), ViewCellState::Hidden);
    }

    #[test]
    fn flagged_hidden_cell_shows_flag() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.toggle_flag((1, 1)).unwrap();

        assert_eq!(ViewCellState::of(&board, (1, 1)), ViewCellState::Flagged);
        assert_eq!(ViewCellState::Flagged.content(), "🚩");
    }

    #[test]
    fn content_hides_zero_counts() {
        assert_eq!(ViewCellState::Revealed(0).content(), "");
        assert_eq!(ViewCellState::Revealed(3).content(), "3");
        assert_eq!(ViewCellState::Hidden.content(), "");
        assert_eq!(ViewCellState::TriggeredMine.content(), "💣");
    }

    fn held(pos: arcade::Coord2, buttons: MouseButtons) -> Option<CellPointerState> {
        Some(CellPointerState { pos, buttons })
    }

    #[test]
    fn left_release_reveals_held_cell() {
        assert_eq!(
            release_action(held((3, 4), MouseButtons::LEFT)),
            Some(((3, 4), CellAction::Reveal))
        );
    }

    #[test]
    fn right_release_flags_held_cell() {
        assert_eq!(
            release_action(held((0, 7), MouseButtons::RIGHT)),
            Some(((0, 7), CellAction::Flag))
        );
    }

    #[test]
    fn chords_and_other_buttons_cancel() {
        assert_eq!(release_action(held((1, 1), MouseButtons::LEFT | MouseButtons::RIGHT)), None);
        assert_eq!(release_action(held((1, 1), MouseButtons::MIDDLE)), None);
        assert_eq!(release_action(None), None);
    }

    #[test]
    fn right_release_toggles_flag_on_board() {
        let mut board = board((2, 2), &[(0, 0)]);
        let Some((pos, CellAction::Flag)) = release_action(held((1, 0), MouseButtons::RIGHT)) else {
            panic!("right release should flag");
        };
        assert_eq!(board.toggle_flag(pos), Ok(arcade::MarkOutcome::Flagged));
        assert_eq!(ViewCellState::of(&board, pos), ViewCellState::Flagged);
    }

    #[test]
    fn number_cells_get_count_class() {
        assert!(ViewCellState::Revealed(4).classes().contains("num-4"));
        assert!(ViewCellState::TriggeredMine.classes().contains("oops"));
    }
}
