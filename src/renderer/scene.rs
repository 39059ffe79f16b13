//! What each entity and screen looks like
//!
//! Pure description on top of the `Renderer` primitives; nothing here
//! touches simulation state.

use glam::Vec2;

use super::{Color, Renderer, TextAlign, TextStyle};
use crate::sim::{
    Cloud, Collectible, CollectibleKind, Enemy, EnemyKind, GamePhase, Platform, Player, Projectile,
    Rect, World,
};

const SKY_TOP: Color = Color::hex(0x87ceeb);
const SKY_BOTTOM: Color = Color::hex(0x6495ed);
const DIRT: Color = Color::hex(0x795548);
const GRASS: Color = Color::hex(0x4caf50);
const PLAYER_BODY: Color = Color::hex(0x007bff);
const SLIME: Color = Color::hex(0x388e3c);
const MUSHROOM_CAP: Color = Color::hex(0xd32f2f);
const MUSHROOM_STEM: Color = Color::hex(0xffecb3);
const BIRD: Color = Color::hex(0x03f4c0);
const BEAK: Color = Color::hex(0xffa500);
const COIN: Color = Color::hex(0xffd700);
const CHEST: Color = Color::hex(0x8b4513);
const LOCK: Color = Color::hex(0x696969);
const SHOT: Color = Color::hex(0xffff00);
const BOOTS: Color = Color::hex(0xffeb3b);
const PACK: Color = Color::hex(0xd32f2f);
const FUEL_LOW: Color = Color::hex(0xff0000);
const GAUGE: Color = Color::hex(0x808080);
const BUTTON: Color = Color::hex(0x4caf50);

/// Anything that knows how to draw itself
pub trait Draw {
    fn draw(&self, r: &mut dyn Renderer);
}

fn sub_rect(base: &Rect, dx: f32, dy: f32, w: f32, h: f32) -> Rect {
    Rect::new(base.left() + dx, base.top() + dy, w, h)
}

impl Draw for Platform {
    fn draw(&self, r: &mut dyn Renderer) {
        r.draw_rounded_box(&self.rect, 8.0, DIRT);
        let grass = sub_rect(&self.rect, 0.0, 0.0, self.rect.width(), self.rect.height().min(5.0));
        r.draw_rounded_box(&grass, 8.0, GRASS);
    }
}

impl Draw for Cloud {
    fn draw(&self, r: &mut dyn Renderer) {
        let (w, h) = (self.rect.width(), self.rect.height());
        r.draw_rounded_box(&self.rect, 15.0, Color::WHITE);
        r.draw_rounded_box(&sub_rect(&self.rect, -20.0, 10.0, w * 0.7, h * 0.7), 15.0, Color::WHITE);
        r.draw_rounded_box(&sub_rect(&self.rect, w - 50.0, 5.0, w * 0.4, h * 0.9), 15.0, Color::WHITE);
    }
}

impl Draw for Collectible {
    fn draw(&self, r: &mut dyn Renderer) {
        let (w, h) = (self.rect.width(), self.rect.height());
        match self.kind {
            CollectibleKind::Coin => r.draw_rounded_box(&self.rect, w / 2.0, COIN),
            CollectibleKind::Chest => {
                r.draw_rounded_box(&self.rect, 4.0, CHEST);
                r.draw_box(&sub_rect(&self.rect, w / 2.0 - 2.0, h * 0.3, 4.0, 6.0), LOCK);
            }
        }
    }
}

impl Draw for Enemy {
    fn draw(&self, r: &mut dyn Renderer) {
        let (w, h) = (self.rect.width(), self.rect.height());
        match self.kind() {
            EnemyKind::Slime => {
                // Dome: rounded top half, flat bottom
                r.draw_rounded_box(&sub_rect(&self.rect, 0.0, 0.0, w, h), w / 2.0, SLIME);
                r.draw_box(&sub_rect(&self.rect, 0.0, h / 2.0, w, h / 2.0), SLIME);
                r.draw_box(&sub_rect(&self.rect, w * 0.2, h * 0.4, 5.0, 5.0), Color::WHITE);
                r.draw_box(&sub_rect(&self.rect, w * 0.6, h * 0.4, 5.0, 5.0), Color::WHITE);
            }
            EnemyKind::Mushroom => {
                r.draw_rounded_box(&sub_rect(&self.rect, w * 0.3, h * 0.6, w * 0.4, h * 0.4), 4.0, MUSHROOM_STEM);
                r.draw_rounded_box(&sub_rect(&self.rect, 0.0, 0.0, w, h * 0.6), 10.0, MUSHROOM_CAP);
            }
            EnemyKind::Bird => {
                r.draw_rounded_box(&self.rect, h / 2.0, BIRD);
                r.draw_box(&sub_rect(&self.rect, w, h * 0.3, 5.0, h * 0.4), BEAK);
            }
        }
    }
}

impl Draw for Projectile {
    fn draw(&self, r: &mut dyn Renderer) {
        r.draw_rounded_box(&self.rect, 2.0, SHOT);
    }
}

/// Player plus the gauges that need tuning context
pub struct PlayerSprite<'a> {
    pub player: &'a Player,
    /// Fuel as a fraction of the tank
    pub fuel: f32,
}

impl Draw for PlayerSprite<'_> {
    fn draw(&self, r: &mut dyn Renderer) {
        let p = self.player;
        let body = &p.rect;
        let (w, h) = (body.width(), body.height());
        let ups = &p.power_ups;

        if ups.slow_fall {
            r.draw_rounded_box(&sub_rect(body, -20.0, 10.0, 20.0, 25.0), 6.0, Color::WHITE);
        }
        if ups.high_jump {
            r.draw_rounded_box(&sub_rect(body, 2.0, h - 5.0, 10.0, 5.0), 2.0, BOOTS);
            r.draw_rounded_box(&sub_rect(body, 18.0, h - 5.0, 10.0, 5.0), 2.0, BOOTS);
        }
        if ups.jetpack {
            r.draw_rounded_box(&sub_rect(body, -8.0, 10.0, 8.0, 25.0), 3.0, PACK);
            if p.is_thrusting && p.fuel > 0.0 {
                r.draw_box(&sub_rect(body, -8.0, 25.0, 8.0, 15.0), BEAK);
            }
        }

        r.draw_rounded_box(body, w / 2.0, PLAYER_BODY);

        if ups.blaster {
            r.draw_rounded_box(&sub_rect(body, w - 5.0, h / 2.0 - 5.0, 10.0, 10.0), 3.0, Color::BLACK);
        }

        for shot in &p.projectiles {
            shot.draw(r);
        }

        if ups.jetpack {
            r.draw_box(&sub_rect(body, 0.0, -10.0, w, 5.0), GAUGE);
            let color = if self.fuel > 0.2 { COIN } else { FUEL_LOW };
            r.draw_box(&sub_rect(body, 0.0, -10.0, w * self.fuel, 5.0), color);
        }
    }
}

/// Everything a frame depends on
pub struct Frame<'a> {
    pub phase: GamePhase,
    pub world: Option<&'a World>,
    pub high_score: u64,
    pub width: f32,
    pub height: f32,
}

/// Menu start button, also used for click hit-testing
pub fn start_button(width: f32, height: f32) -> Rect {
    Rect::new(width / 2.0 - 100.0, height / 2.0 + 10.0, 200.0, 50.0)
}

fn text(size: f32, color: Color, align: TextAlign) -> TextStyle {
    TextStyle::new(size, color, align)
}

pub fn draw_frame(frame: &Frame<'_>, r: &mut dyn Renderer) {
    r.draw_gradient_background(SKY_TOP, SKY_BOTTOM, 0.7);

    match (frame.phase, frame.world) {
        (GamePhase::Menu, _) | (_, None) => draw_menu(frame, r),
        (GamePhase::Playing, Some(world)) => {
            draw_world(world, r);
            draw_hud(world, r);
        }
        (GamePhase::Paused, Some(world)) => {
            draw_world(world, r);
            draw_hud(world, r);
            draw_pause(frame, r);
        }
        (GamePhase::GameOver, Some(world)) => {
            draw_world(world, r);
            draw_game_over(frame, world.score, r);
        }
    }
}

fn draw_world(world: &World, r: &mut dyn Renderer) {
    for cloud in &world.clouds {
        cloud.draw(r);
    }
    for platform in &world.platforms {
        platform.draw(r);
    }
    for enemy in &world.enemies {
        enemy.draw(r);
    }
    for item in &world.collectibles {
        item.draw(r);
    }
    PlayerSprite {
        player: &world.player,
        fuel: world.player.fuel_fraction(&world.tuning.player),
    }
    .draw(r);
}

/// `Jump Power + Blaster`
pub fn power_up_summary(player: &Player) -> String {
    player
        .power_ups
        .active()
        .map(|k| k.label())
        .collect::<Vec<_>>()
        .join(" + ")
}

fn draw_hud(world: &World, r: &mut dyn Renderer) {
    let style = text(20.0, Color::BLACK, TextAlign::Left);
    r.draw_text(&format!("Score: {}", world.score), Vec2::new(20.0, 30.0), style);

    let player = &world.player;
    if player.power_up_timer > 0.0 {
        let line = format!(
            "Active Power-Ups: {}: {}s",
            power_up_summary(player),
            player.power_up_seconds()
        );
        r.draw_text(&line, Vec2::new(20.0, 60.0), TextStyle { color: BOOTS, ..style });
    }
}

fn draw_menu(frame: &Frame<'_>, r: &mut dyn Renderer) {
    let cx = frame.width / 2.0;
    let cy = frame.height / 2.0;
    r.draw_text("Runner Game", Vec2::new(cx, cy - 100.0), text(50.0, Color::BLACK, TextAlign::Center));
    r.draw_text(
        &format!("High Score: {}", frame.high_score),
        Vec2::new(cx, cy - 40.0),
        text(24.0, Color::BLACK, TextAlign::Center),
    );

    let button = start_button(frame.width, frame.height);
    r.draw_rounded_box(&button, 10.0, BUTTON);
    r.draw_text(
        "Start Game",
        Vec2::new(cx, button.top() + 35.0),
        text(30.0, Color::WHITE, TextAlign::Center),
    );
    r.draw_text(
        "Press Enter to start",
        Vec2::new(cx, button.top() + 80.0),
        text(20.0, Color::BLACK, TextAlign::Center),
    );
}

fn shade(frame: &Frame<'_>, alpha: f32, r: &mut dyn Renderer) {
    let screen = Rect::new(0.0, 0.0, frame.width, frame.height);
    r.draw_box(&screen, Color::BLACK.with_alpha(alpha));
}

fn draw_pause(frame: &Frame<'_>, r: &mut dyn Renderer) {
    shade(frame, 0.5, r);
    let (cx, cy) = (frame.width / 2.0, frame.height / 2.0);
    r.draw_text("PAUSED", Vec2::new(cx, cy - 40.0), text(70.0, Color::WHITE, TextAlign::Center));
    r.draw_text(
        "Press ESC to resume",
        Vec2::new(cx, cy + 30.0),
        text(30.0, Color::WHITE, TextAlign::Center),
    );
}

fn draw_game_over(frame: &Frame<'_>, score: u64, r: &mut dyn Renderer) {
    shade(frame, 0.7, r);
    let (cx, cy) = (frame.width / 2.0, frame.height / 2.0);
    r.draw_text("GAME OVER", Vec2::new(cx, cy - 40.0), text(50.0, Color::WHITE, TextAlign::Center));
    r.draw_text(
        &format!("Your Score: {score}"),
        Vec2::new(cx, cy + 10.0),
        text(24.0, Color::WHITE, TextAlign::Center),
    );
    r.draw_text(
        "Press Enter to return to menu",
        Vec2::new(cx, cy + 60.0),
        text(20.0, Color::WHITE, TextAlign::Center),
    );
}
