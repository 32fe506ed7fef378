//! In-game HUD - health, mana, experience, and the equipped weapon and spell.

use bevy::prelude::*;

use crate::core::GameState;
use crate::world::ActiveLevel;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for mana bar fill.
#[derive(Component)]
pub struct ManaBar;

#[derive(Component)]
pub struct ExpText;

/// Which selection box a [`SelectionText`] shows.
#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSlot {
    Weapon,
    Spell,
}

#[derive(Component)]
pub struct SelectionText(pub SelectionSlot);

const BOX_COLOR: Color = Color::srgb(0.13, 0.13, 0.13);
const BOX_BORDER: Color = Color::srgb(0.07, 0.07, 0.07);
/// Border while the slot is locked after a switch.
const BOX_BORDER_ACTIVE: Color = Color::srgb(0.83, 0.63, 0.09);
const TEXT_COLOR: Color = Color::srgb(0.93, 0.93, 0.93);

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnEnter(GameState::GameOver), cleanup_hud)
        .add_systems(
            Update,
            (update_bars, update_exp, update_selection)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI. Kept across pause, so only spawned once per game.
fn spawn_hud(mut commands: Commands, existing: Query<(), With<HudRoot>>) {
    if !existing.is_empty() {
        return;
    }

    // Bars, top-left
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_bar(parent, 200.0, Color::srgb(0.8, 0.2, 0.2), HealthBar);
            spawn_bar(parent, 140.0, Color::srgb(0.2, 0.4, 0.9), ManaBar);
        });

    // Experience, bottom-right
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(6.0)),
            ..default()
        },
        BackgroundColor(BOX_COLOR),
        HudRoot,
    ))
    .with_children(|parent| {
        parent.spawn((
            Text::new("0"),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(TEXT_COLOR),
            ExpText,
        ));
    });

    // Weapon and spell boxes, bottom-left
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                bottom: Val::Px(10.0),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::End,
                column_gap: Val::Px(10.0),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_selection_box(parent, SelectionSlot::Weapon);
            spawn_selection_box(parent, SelectionSlot::Spell);
        });
}

/// Helper to spawn a status bar.
fn spawn_bar<M: Component>(parent: &mut ChildBuilder, width: f32, color: Color, bar_marker: M) {
    parent
        .spawn((
            Node {
                width: Val::Px(width),
                height: Val::Px(20.0),
                margin: UiRect::bottom(Val::Px(8.0)),
                border: UiRect::all(Val::Px(3.0)),
                ..default()
            },
            BackgroundColor(BOX_COLOR),
            BorderColor(BOX_BORDER),
        ))
        .with_children(|bg| {
            bg.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(color),
                bar_marker,
            ));
        });
}

fn spawn_selection_box(parent: &mut ChildBuilder, slot: SelectionSlot) {
    parent
        .spawn((
            Node {
                width: Val::Px(80.0),
                height: Val::Px(80.0),
                border: UiRect::all(Val::Px(3.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BOX_COLOR),
            BorderColor(BOX_BORDER),
            slot,
        ))
        .with_children(|inner| {
            inner.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                SelectionText(slot),
            ));
        });
}

/// Update health and mana bars from the player snapshot.
fn update_bars(
    level: Option<Res<ActiveLevel>>,
    mut health_query: Query<&mut Node, (With<HealthBar>, Without<ManaBar>)>,
    mut mana_query: Query<&mut Node, (With<ManaBar>, Without<HealthBar>)>,
) {
    let Some(level) = level else {
        return;
    };
    let snapshot = level.0.player_snapshot();

    if let Ok(mut bar) = health_query.get_single_mut() {
        bar.width = Val::Percent(snapshot.health.fraction() * 100.0);
    }
    if let Ok(mut bar) = mana_query.get_single_mut() {
        bar.width = Val::Percent(snapshot.mana.fraction() * 100.0);
    }
}

fn update_exp(level: Option<Res<ActiveLevel>>, mut text_query: Query<&mut Text, With<ExpText>>) {
    let Some(level) = level else {
        return;
    };
    if let Ok(mut text) = text_query.get_single_mut() {
        text.0 = level.0.player().exp.to_string();
    }
}

/// Show the equipped weapon and spell; highlight a box while its switch is
/// locked.
fn update_selection(
    level: Option<Res<ActiveLevel>>,
    mut box_query: Query<(&SelectionSlot, &mut BorderColor)>,
    mut text_query: Query<(&SelectionText, &mut Text)>,
) {
    let Some(level) = level else {
        return;
    };
    let snapshot = level.0.player_snapshot();

    for (slot, mut border) in box_query.iter_mut() {
        let locked = match slot {
            SelectionSlot::Weapon => !snapshot.can_switch_weapon,
            SelectionSlot::Spell => !snapshot.can_switch_spell,
        };
        border.0 = if locked { BOX_BORDER_ACTIVE } else { BOX_BORDER };
    }

    for (SelectionText(slot), mut text) in text_query.iter_mut() {
        text.0 = match slot {
            SelectionSlot::Weapon => snapshot.weapon_name.clone(),
            SelectionSlot::Spell => snapshot.spell_name.clone(),
        };
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
