// ABOUTME: Terminal rendering of the taxonomy tree and color descriptions
// ABOUTME: Swatches use each tag's effective color with a contrasting label

use std::fmt::Write;

use colored::Colorize;

use atelier_core::{contrast_color, hex_to_hsv, parse_hex, Rgb};
use atelier_taxonomy::{effective_color, ProjectType, TagType};

fn swatch(label: &str, hex: &str) -> String {
    match (parse_hex(hex), parse_hex(contrast_color(hex))) {
        (Some(bg), Some(fg)) => format!(" {} ", label)
            .truecolor(fg.r, fg.g, fg.b)
            .on_truecolor(bg.r, bg.g, bg.b)
            .to_string(),
        _ => label.to_string(),
    }
}

fn write_tag_types(out: &mut String, tag_types: &[TagType], indent: &str) {
    for tag_type in tag_types {
        let _ = writeln!(
            out,
            "{}{} {}",
            indent,
            swatch(&tag_type.name, &tag_type.color),
            tag_type.color.dimmed()
        );
        for tag in &tag_type.tags {
            let color = effective_color(tag, tag_type);
            let source = if tag.color.is_some() { "" } else { " (inherited)" };
            let _ = writeln!(
                out,
                "{}    {} {}{}",
                indent,
                swatch(&tag.name, color),
                color.dimmed(),
                source.dimmed()
            );
        }
    }
}

/// Render project types with their tag types and tags, followed by the
/// global tag types
pub fn render_tree(project_types: &[ProjectType], global_tag_types: &[TagType]) -> String {
    let mut out = String::new();

    if project_types.is_empty() && global_tag_types.is_empty() {
        out.push_str("No project types or tag types yet\n");
        return out;
    }

    for project_type in project_types {
        let _ = writeln!(out, "{}", project_type.name.bold());
        if project_type.tag_types.is_empty() {
            let _ = writeln!(out, "    {}", "(no tag types)".dimmed());
        }
        write_tag_types(&mut out, &project_type.tag_types, "    ");
    }

    if !global_tag_types.is_empty() {
        let _ = writeln!(out, "{}", "Global tag types".bold());
        write_tag_types(&mut out, global_tag_types, "    ");
    }

    out
}

/// Describe a hex color, or `None` if it is not `#RRGGBB`. The `#` is optional.
pub fn describe_color(input: &str) -> Option<String> {
    let hex = if input.starts_with('#') {
        input.to_string()
    } else {
        format!("#{}", input)
    };
    let rgb: Rgb = parse_hex(&hex)?;
    let hsv = hex_to_hsv(&hex);
    let contrast = contrast_color(&hex);

    Some(format!(
        "{}\n  rgb       {}, {}, {}\n  hsv       {:.1}°, {:.1}%, {:.1}%\n  contrast  {}\n",
        swatch(&rgb.to_hex(), &hex),
        rgb.r,
        rgb.g,
        rgb.b,
        hsv.h,
        hsv.s * 100.0,
        hsv.v * 100.0,
        contrast
    ))
}
