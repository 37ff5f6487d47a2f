use crate::error::SubmitError;
use crate::feedback::Guess;
use crate::session::{GameSession, GameSnapshot, GameStatus};
use crate::storage::KeyValueStore;
use crate::streak::StreakStats;
use crate::word_source::WordSource;
use crate::{debug_log, info_log};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    NewGame,
    ShowStats,
    Exit,
}

/// The rendering side of the game. Implementations own all input and output;
/// the loop only hands them state.
pub trait GameInterface {
    /// Next user action, or `None` when nothing actionable was entered.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_new_game(&mut self, snapshot: &GameSnapshot);
    fn display_guess(&mut self, guess: &Guess, snapshot: &GameSnapshot);
    fn display_rejection(&mut self, error: &SubmitError);
    fn display_game_over(&mut self, snapshot: &GameSnapshot);
    fn display_stats(&mut self, stats: &StreakStats);
    fn display_exit_message(&mut self);
}

/// Drive games on `session` until the interface asks to exit.
pub async fn game_loop<W, S, I>(session: &mut GameSession<W, S>, interface: &mut I)
where
    W: WordSource,
    S: KeyValueStore,
    I: GameInterface + ?Sized,
{
    session.new_game().await;
    interface.display_new_game(&session.stats());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                session.new_game().await;
                info_log!("game_loop() - new game started");
                interface.display_new_game(&session.stats());
            }
            UserAction::ShowStats => {
                interface.display_stats(&session.streaks().stats());
            }
            UserAction::Guess(raw) => match session.submit_guess(&raw).await {
                Ok(guess) => {
                    let snapshot = session.stats();
                    interface.display_guess(&guess, &snapshot);
                    if snapshot.status != GameStatus::InProgress {
                        interface.display_game_over(&snapshot);
                    }
                }
                Err(e) => {
                    debug_log!("game_loop() - rejected {:?}: {}", raw, e);
                    interface.display_rejection(&e);
                }
            },
        }
    }
}
