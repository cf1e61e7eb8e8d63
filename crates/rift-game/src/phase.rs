//! The turn machine of the game scene.
//!
//! [`update`] runs once per tick, before the game scene's node tree. Every
//! phase change past the first goes through a stage delay, and
//! `awaiting_phase` keeps a phase from scheduling twice while one is pending.
//! Permanents and creatures are played one per tick: the phase sets the
//! `*_playing` slot, the owning node animates the card, applies its effects
//! and clears the slot again.

use rift_scene::Stage;

use crate::context::GameCtx;
use crate::scenes;
use crate::state::{GameOverReason, GameState, Phase, PlayerMode, ALT_WIN_THRESHOLD, DRAW_PER_TURN};

/// Pause between most phases.
pub const PHASE_DELAY: f64 = 300.0;
/// Pause after the draw, so the new hand can settle.
pub const DRAW_DELAY: f64 = 750.0;

pub fn update(stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) {
    match ctx.game.phase {
        Phase::Pregame | Phase::GameOver => {}
        Phase::Begin => begin(stage, ctx),
        Phase::Draw => draw(stage, ctx),
        Phase::Player => player(ctx),
        Phase::Rift => rift(stage, ctx),
        Phase::Discard => discard(stage, ctx),
        Phase::End => {
            if !ctx.game.awaiting_phase {
                schedule(stage, &mut ctx.game, PHASE_DELAY, Phase::Begin);
            }
        }
    }
}

pub fn set_phase(game: &mut GameState, phase: Phase) {
    if game.phase != phase {
        log::info!("turn {}: {} phase", game.turn, phase.label());
    }
    game.phase = phase;
}

/// Moves to `next` after `ms` of stage time. Entering the draw phase starts
/// a new turn.
fn schedule(stage: &mut Stage<GameCtx>, game: &mut GameState, ms: f64, next: Phase) {
    game.awaiting_phase = true;
    stage.delay(ms, move |_, ctx: &mut GameCtx| {
        ctx.game.awaiting_phase = false;
        if ctx.game.phase == Phase::GameOver {
            return;
        }
        if next == Phase::Draw {
            ctx.game.turn += 1;
        }
        set_phase(&mut ctx.game, next);
    });
}

fn game_over(ctx: &mut GameCtx, reason: GameOverReason) {
    log::info!("game over on turn {}: {reason:?}", ctx.game.turn);
    ctx.game.game_over_reason = Some(reason);
    set_phase(&mut ctx.game, Phase::GameOver);
    ctx.nav.push(scenes::GAME_OVER);
}

fn begin(stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) {
    let game = &mut ctx.game;
    if game.awaiting_phase {
        return;
    }
    if let Some(id) = game.permanent_playing {
        if game.permanents.iter().any(|c| c.id == id) {
            return;
        }
        game.permanent_playing = None;
    }
    if let Some(card) = game.permanents.get(game.permanent_playing_index) {
        game.permanent_playing = Some(card.id);
        game.permanent_playing_index += 1;
        return;
    }
    game.permanent_playing_index = 0;
    schedule(stage, game, PHASE_DELAY, Phase::Draw);
}

fn draw(stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) {
    if ctx.game.awaiting_phase {
        return;
    }
    if ctx.game.is_overrun() {
        game_over(ctx, GameOverReason::Overrun);
        return;
    }

    if ctx.game.is_stability_maxed() {
        if ctx.game.encounter_deck.is_empty() {
            ctx.game.summon_encounter("rift horror");
        }
        while !ctx.game.encounter_deck.is_empty() {
            if ctx.game.is_overrun() {
                game_over(ctx, GameOverReason::Overrun);
                return;
            }
            ctx.game.draw_encounter();
        }
        if ctx.game.is_overrun() {
            game_over(ctx, GameOverReason::Overrun);
            return;
        }
    } else {
        ctx.game.draw_encounter();
    }

    let game = &mut ctx.game;
    for _ in 0..DRAW_PER_TURN {
        game.draw_player_card();
    }
    schedule(stage, game, DRAW_DELAY, Phase::Player);
}

fn player(ctx: &mut GameCtx) {
    let game = &mut ctx.game;
    let outstanding = match game.mode {
        PlayerMode::Play => 0,
        PlayerMode::Discard => game.discards_required,
        PlayerMode::Destroy => game.destroys_required,
    };
    if game.mode != PlayerMode::Play && (outstanding == 0 || game.player_hand.is_empty()) {
        game.discards_required = 0;
        game.destroys_required = 0;
        game.mode = PlayerMode::Play;
    }

    let reason = if game.is_cleared() {
        Some(GameOverReason::Clear)
    } else if game.stitch_counter >= ALT_WIN_THRESHOLD {
        Some(GameOverReason::Stitch)
    } else if game.favour_counter >= ALT_WIN_THRESHOLD {
        Some(GameOverReason::OldOne)
    } else {
        None
    };
    if let Some(reason) = reason {
        game_over(ctx, reason);
    }
}

fn rift(stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) {
    let game = &mut ctx.game;
    if game.awaiting_phase {
        return;
    }
    if let Some(id) = game.encounter_playing {
        if game.encounter(id).is_some() {
            return;
        }
        game.encounter_playing = None;
    }

    if game.rift_snapshot.is_empty() && game.encounter_playing_index == 0 {
        game.rift_snapshot = game.encounters_active.iter().map(|c| c.id).collect();
    }
    while let Some(&id) = game.rift_snapshot.get(game.encounter_playing_index) {
        game.encounter_playing_index += 1;
        if game.encounter(id).is_some() {
            game.encounter_playing = Some(id);
            return;
        }
    }

    game.encounter_playing_index = 0;
    game.rift_snapshot.clear();
    let rate = game.stability_rate();
    game.raise_stability(rate);
    schedule(stage, game, PHASE_DELAY, Phase::Discard);
}

fn discard(stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) {
    let game = &mut ctx.game;
    game.discard_hand();
    if game.discard_queue.is_empty() && !game.awaiting_phase {
        schedule(stage, game, PHASE_DELAY, Phase::End);
    }
}
