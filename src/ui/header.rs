//! Header rendering: logo, particle band and glow rules.
//!
//! Everything decorative here scales with the tuner's [`PerformanceConfig`].

use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::constants::performance::FULL_PARTICLE_BUDGET;
use crate::performance::PerformanceConfig;

use super::colors;

const LOGO: [&str; 3] = [
    "█▀▀ █▀█ █   █ █▀█",
    "█▀  █ █ █   █ █ █",
    "▀   ▀▀▀ ▀▀▀ ▀ ▀▀▀",
];

const GLITCH_GLYPHS: [char; 6] = ['▓', '▒', '░', '╳', '¦', '▚'];
const PARTICLE_GLYPHS: [char; 5] = ['·', '∙', '•', '+', '*'];

/// Share of the particle band that is filled at the full budget.
const MAX_PARTICLE_DENSITY: f64 = 0.5;

/// Draws the header with logo, status badge and decorations.
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let config = app.tuner.config();
    let width = usize::from(area.width);
    let border_style = Style::default().fg(colors::BORDER);
    let dim_style = Style::default().fg(colors::DIM);

    // Status indicator
    let status = if app.is_busy() {
        vec![
            Span::styled("┃", border_style),
            Span::styled(
                " ◈ ",
                Style::default()
                    .fg(colors::WARNING)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled("SENDING", Style::default().fg(colors::WARNING).bold()),
            Span::styled(" ┃", border_style),
        ]
    } else {
        vec![
            Span::styled("┃", border_style),
            Span::styled(" ◈ ", Style::default().fg(colors::SUCCESS)),
            Span::styled(
                app.destination.clone(),
                Style::default().fg(colors::SUCCESS).bold(),
            ),
            Span::styled(" ┃", border_style),
        ]
    };

    let mut top = vec![
        Span::styled("┏", Style::default().fg(colors::ACCENT)),
        Span::styled("━━━━━━━━━━━━━━━━━━━━━", border_style),
        Span::styled("┓", Style::default().fg(colors::PRIMARY)),
        Span::styled("░▒▓", dim_style),
    ];
    top.extend(status);
    top.push(Span::styled("▓▒░", dim_style));

    let mut lines = vec![Line::from(top)];

    let glitch_seed = if config.enable_animations {
        app.frame_count / 6
    } else {
        0
    };
    for (row, text) in LOGO.iter().enumerate() {
        lines.push(logo_line(row, text, &config, glitch_seed));
    }

    lines.push(Line::from(vec![
        Span::styled("┗", Style::default().fg(colors::ACCENT)),
        Span::styled("━━━━━━━━━━━━━━━━━━━━━", border_style),
        Span::styled("┛", Style::default().fg(colors::PRIMARY)),
        Span::styled("  ◆ ", Style::default().fg(colors::ACCENT)),
        Span::styled("CONTACT", Style::default().fg(colors::PRIMARY).bold()),
        Span::styled("::", Style::default().fg(colors::MUTED)),
        Span::styled("QUALITY ", Style::default().fg(colors::KEY).bold()),
        Span::styled(
            config.quality.to_string(),
            Style::default().fg(colors::SECONDARY).bold(),
        ),
        Span::styled(" ▸ ", Style::default().fg(colors::MUTED)),
        Span::styled(
            format!("{} FPS", app.tuner.fps()),
            Style::default().fg(colors::MUTED),
        ),
    ]));

    let particle_seed = if config.enable_animations {
        app.frame_count / 2
    } else {
        0
    };
    lines.push(particle_line(width, config.particle_count, particle_seed));
    lines.extend(glow_lines(width, config.glow_layers));

    frame.render_widget(Paragraph::new(lines), area);
}

/// One logo row, with depth shading and an occasional glitched glyph.
fn logo_line(row: usize, text: &str, config: &PerformanceConfig, seed: u64) -> Line<'static> {
    let color = if config.use_3d {
        colors::LOGO_DEPTH[row % colors::LOGO_DEPTH.len()]
    } else {
        colors::PRIMARY
    };
    let style = Style::default().fg(color).bold();

    let mut rendered: String = text.to_string();
    if config.enable_animations {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_mul(31).wrapping_add(row as u64));
        // Glitch roughly one frame in four
        if rng.gen_ratio(1, 4) {
            let chars: Vec<char> = text.chars().collect();
            let pos = rng.gen_range(0..chars.len());
            let glyph = GLITCH_GLYPHS[rng.gen_range(0..GLITCH_GLYPHS.len())];
            rendered = chars
                .iter()
                .enumerate()
                .map(|(i, c)| if i == pos { glyph } else { *c })
                .collect();
        }
    }

    let mut spans = vec![
        Span::styled("┃ ", Style::default().fg(colors::ACCENT)),
        Span::styled(rendered, style),
    ];
    if config.use_3d {
        spans.push(Span::styled("▒", Style::default().fg(colors::DIM)));
        spans.push(Span::raw("  "));
    } else {
        spans.push(Span::raw("   "));
    }
    spans.push(Span::styled("┃", Style::default().fg(colors::PRIMARY)));
    Line::from(spans)
}

/// Fraction of the band covered by particles for a given budget.
fn particle_density(particle_count: u32) -> f64 {
    let share = f64::from(particle_count.min(FULL_PARTICLE_BUDGET)) / f64::from(FULL_PARTICLE_BUDGET);
    share * MAX_PARTICLE_DENSITY
}

/// A row of drifting particles.
fn particle_line(width: usize, particle_count: u32, seed: u64) -> Line<'static> {
    let density = particle_density(particle_count);
    let mut rng = StdRng::seed_from_u64(seed);

    let spans: Vec<Span> = (0..width)
        .map(|_| {
            if rng.gen_bool(density) {
                let glyph = PARTICLE_GLYPHS[rng.gen_range(0..PARTICLE_GLYPHS.len())];
                let color = colors::PARTICLES[rng.gen_range(0..colors::PARTICLES.len())];
                Span::styled(glyph.to_string(), Style::default().fg(color))
            } else {
                Span::raw(" ")
            }
        })
        .collect();
    Line::from(spans)
}

/// Horizontal glow rules, one per layer.
fn glow_lines(width: usize, layers: u8) -> Vec<Line<'static>> {
    colors::GLOW
        .iter()
        .take(usize::from(layers))
        .map(|color| Line::from(Span::styled("▁".repeat(width), Style::default().fg(*color))))
        .collect()
}
