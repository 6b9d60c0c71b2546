use bevy::prelude::*;
use country_data::CountryRecord;

use super::placement::place_tooltip;

/// The floating country info panel.
#[derive(Component)]
pub struct TooltipPanel;

/// One text line of the tooltip, in display order.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TooltipField {
    Name,
    Capital,
    Population,
}

impl TooltipField {
    pub const ALL: [TooltipField; 3] = [Self::Name, Self::Capital, Self::Population];

    pub fn line(&self, record: &CountryRecord) -> String {
        match self {
            Self::Name => record.name_line(),
            Self::Capital => record.capital_line(),
            Self::Population => record.population_line(),
        }
    }
}

// Hidden rather than Display::None so the panel keeps a laid-out size for
// overflow checks before it is first shown.
pub fn spawn_tooltip(mut commands: Commands) {
    commands
        .spawn((
            TooltipPanel,
            Name::new("CountryTooltip"),
            BackgroundColor(Color::srgba(0.10, 0.11, 0.13, 0.9)),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            BorderRadius::all(Val::Px(4.0)),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                row_gap: Val::Px(4.0),
                border: UiRect::all(Val::Px(1.0)),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            Visibility::Hidden,
            GlobalZIndex(10),
        ))
        .with_children(|panel| {
            for field in TooltipField::ALL {
                panel.spawn((
                    field,
                    Text::default(),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::srgb(1.0, 1.0, 1.0)),
                ));
            }
        });
}

/// Pointer position and surface bounds the panel is placed against.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct TooltipAnchor {
    /// Pointer position in logical window pixels.
    pub pointer: Vec2,
    pub surface_right: f32,
    pub viewport_height: f32,
    /// False while no country is hovered.
    pub shown: bool,
}

impl TooltipAnchor {
    pub fn show_at(&mut self, pointer: Vec2, surface_right: f32, viewport_height: f32) {
        *self = Self {
            pointer,
            surface_right,
            viewport_height,
            shown: true,
        };
    }

    pub fn hide(&mut self) {
        self.shown = false;
    }
}

/// Place the panel using the size the layout pass computed for its current text.
///
/// Runs after UI layout, so a moved panel reaches its new position on the next
/// layout pass. A hidden panel stays hidden until it has been laid out where it
/// belongs.
pub fn position_tooltip(
    anchor: Res<TooltipAnchor>,
    mut panel_query: Query<(&mut Node, &mut Visibility, &ComputedNode), With<TooltipPanel>>,
) {
    let Ok((mut node, mut visibility, computed)) = panel_query.single_mut() else {
        return;
    };

    if !anchor.shown {
        if *visibility != Visibility::Hidden {
            *visibility = Visibility::Hidden;
        }
        return;
    }

    let panel_size = computed.size() * computed.inverse_scale_factor();
    let placement = place_tooltip(
        anchor.pointer,
        panel_size,
        anchor.surface_right,
        anchor.viewport_height,
    );

    // Compared before writing so an unmoved panel does not trigger relayout.
    let (left, top) = (Val::Px(placement.left), Val::Px(placement.top));
    if node.left != left || node.top != top {
        node.left = left;
        node.top = top;
        return;
    }

    let target = if placement.visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    if *visibility != target {
        *visibility = target;
    }
}
