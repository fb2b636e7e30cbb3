use crate::layout::*;

const DASHED_LIFELINE: &str = "5,5";
const DOTTED_MESSAGE: &str = "3,3";

/// Writes the layout as a standalone SVG document.
pub fn render(layout: &Layout) -> String {
    let mut out = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        layout.width, layout.height
    );

    for actor in &layout.actors {
        draw_actor(&mut out, actor, layout.height);
    }
    for row in &layout.rows {
        match row {
            Row::Message(m) => draw_message(&mut out, m),
            Row::Note(n) => draw_note(&mut out, n),
        }
    }
    draw_defs(&mut out);

    out.push_str("</svg>\n");
    out
}

fn draw_actor(out: &mut String, actor: &ActorLayout, height: f64) {
    out.push_str("  <g>\n");
    out.push_str(&format!(
        "    <rect x=\"{}\" y=\"{BOX_TOP}\" width=\"{BOX_WIDTH}\" height=\"{BOX_HEIGHT}\" fill=\"white\" stroke=\"black\" />\n",
        actor.box_x
    ));
    out.push_str(&format!(
        "    <text x=\"{}\" y=\"{LABEL_Y}\" text-anchor=\"middle\">{}</text>\n",
        actor.center_x,
        escape(&actor.label)
    ));
    out.push_str(&format!(
        "    <line x1=\"{x}\" y1=\"{LIFELINE_TOP}\" x2=\"{x}\" y2=\"{height}\" stroke=\"black\" stroke-dasharray=\"{DASHED_LIFELINE}\" />\n",
        x = actor.center_x
    ));
    out.push_str("  </g>\n");
}

fn draw_message(out: &mut String, msg: &MessageRow) {
    let dash = if msg.arrow.is_dotted() {
        format!(" stroke-dasharray=\"{DOTTED_MESSAGE}\"")
    } else {
        String::new()
    };
    let marker = if msg.arrow.is_filled() {
        "arrow"
    } else {
        "arrow-open"
    };

    out.push_str("  <g>\n");
    out.push_str(&format!(
        "    <line x1=\"{}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\" stroke=\"black\"{dash} marker-end=\"url(#{marker})\" />\n",
        msg.start_x,
        msg.end_x,
        y = msg.y
    ));
    out.push_str(&format!(
        "    <text x=\"{}\" y=\"{}\" text-anchor=\"middle\">{}</text>\n",
        (msg.start_x + msg.end_x) / 2.0,
        msg.y - TEXT_RAISE,
        escape(&msg.text)
    ));
    out.push_str("  </g>\n");
}

fn draw_note(out: &mut String, note: &NoteRow) {
    out.push_str("  <g>\n");
    out.push_str(&format!(
        "    <rect x=\"{}\" y=\"{}\" width=\"{NOTE_WIDTH}\" height=\"{NOTE_HEIGHT}\" fill=\"yellow\" stroke=\"black\" />\n",
        note.center_x - NOTE_WIDTH / 2.0,
        note.y - NOTE_HEIGHT / 2.0
    ));
    out.push_str(&format!(
        "    <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\">\n",
        note.center_x, note.y
    ));
    for (i, line) in note.lines.iter().enumerate() {
        let dy = if i == 0 { "0" } else { "1.2em" };
        out.push_str(&format!(
            "      <tspan x=\"{}\" dy=\"{dy}\">{}</tspan>\n",
            note.center_x,
            escape(line)
        ));
    }
    out.push_str("    </text>\n");
    out.push_str("  </g>\n");
}

fn draw_defs(out: &mut String) {
    out.push_str("  <defs>\n");
    out.push_str("    <marker id=\"arrow\" markerWidth=\"10\" markerHeight=\"10\" refX=\"9\" refY=\"3\" orient=\"auto\" markerUnits=\"strokeWidth\">\n");
    out.push_str("      <path d=\"M0,0 L0,6 L9,3 z\" fill=\"black\" />\n");
    out.push_str("    </marker>\n");
    out.push_str("    <marker id=\"arrow-open\" markerWidth=\"10\" markerHeight=\"10\" refX=\"9\" refY=\"3\" orient=\"auto\" markerUnits=\"strokeWidth\">\n");
    out.push_str("      <path d=\"M0,0 L9,3 L0,6\" fill=\"none\" stroke=\"black\" />\n");
    out.push_str("    </marker>\n");
    out.push_str("  </defs>\n");
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
