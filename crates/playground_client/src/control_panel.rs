use bevy::prelude::*;
use playground_simulation::{PlaygroundSet, SceneCommand};

/// Панель управления: три кнопки + горячие клавиши S / B / R
pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_control_panel).add_systems(
            Update,
            (
                handle_panel_buttons,
                handle_panel_hotkeys,
                highlight_panel_buttons,
            )
                .before(PlaygroundSet::Commands),
        );
    }
}

/// Какую команду шлёт кнопка
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    CreateSphere,
    CreateBox,
    Reset,
}

impl PanelAction {
    const ALL: [PanelAction; 3] = [PanelAction::CreateSphere, PanelAction::CreateBox, PanelAction::Reset];

    fn label(&self) -> &'static str {
        match self {
            PanelAction::CreateSphere => "Create sphere",
            PanelAction::CreateBox => "Create box",
            PanelAction::Reset => "Reset",
        }
    }

    fn command(&self) -> SceneCommand {
        match self {
            PanelAction::CreateSphere => SceneCommand::SpawnRandomSphere,
            PanelAction::CreateBox => SceneCommand::SpawnRandomBox,
            PanelAction::Reset => SceneCommand::Reset,
        }
    }

    fn hotkey(&self) -> KeyCode {
        match self {
            PanelAction::CreateSphere => KeyCode::KeyS,
            PanelAction::CreateBox => KeyCode::KeyB,
            PanelAction::Reset => KeyCode::KeyR,
        }
    }
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.18);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.35, 0.55, 0.35);

fn spawn_control_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                right: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.05, 0.8)),
        ))
        .with_children(|panel| {
            for action in PanelAction::ALL {
                panel
                    .spawn((
                        Button,
                        action,
                        Node {
                            width: Val::Px(160.0),
                            padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                            ..default()
                        },
                        BackgroundColor(BUTTON_IDLE),
                    ))
                    .with_child((
                        Text::new(action.label()),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
            }
        });
}

fn handle_panel_buttons(
    query: Query<(&Interaction, &PanelAction), Changed<Interaction>>,
    mut commands: EventWriter<SceneCommand>,
) {
    for (interaction, action) in query.iter() {
        if *interaction == Interaction::Pressed {
            commands.write(action.command());
        }
    }
}

fn handle_panel_hotkeys(keys: Res<ButtonInput<KeyCode>>, mut commands: EventWriter<SceneCommand>) {
    for action in PanelAction::ALL {
        if keys.just_pressed(action.hotkey()) {
            commands.write(action.command());
        }
    }
}

fn highlight_panel_buttons(
    mut query: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<PanelAction>)>,
) {
    for (interaction, mut color) in query.iter_mut() {
        color.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_IDLE,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_action_maps_to_its_command() {
        assert_eq!(PanelAction::CreateSphere.command(), SceneCommand::SpawnRandomSphere);
        assert_eq!(PanelAction::CreateBox.command(), SceneCommand::SpawnRandomBox);
        assert_eq!(PanelAction::Reset.command(), SceneCommand::Reset);
    }

    #[test]
    fn test_hotkeys_are_distinct() {
        let keys: Vec<KeyCode> = PanelAction::ALL.iter().map(|action| action.hotkey()).collect();
        for (i, key) in keys.iter().enumerate() {
            assert!(!keys[i + 1..].contains(key));
        }
    }
}
