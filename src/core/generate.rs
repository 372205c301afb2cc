/// Which canned template pair a scan profile uses. `Napoleon` is the fixed
/// history-niche narrative arc; `Generic` is the shorter keyword-driven one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStyle {
    Generic,
    Napoleon,
}

/// Render a narration script for a video title. Total over any input,
/// including empty strings; never precomputed, only invoked when the user
/// asks for it on a specific result.
pub fn narration_script(style: ScriptStyle, title: &str, keyword: &str) -> String {
    match style {
        ScriptStyle::Generic => generic_script(title, keyword),
        ScriptStyle::Napoleon => napoleon_script(title, keyword),
    }
}

/// Render an image-generation prompt for a thumbnail. The title is
/// interpolated verbatim into a trailing context line.
pub fn thumbnail_prompt(style: ScriptStyle, title: &str) -> String {
    match style {
        ScriptStyle::Generic => generic_thumbnail_prompt(title),
        ScriptStyle::Napoleon => napoleon_thumbnail_prompt(title),
    }
}

fn generic_script(title: &str, keyword: &str) -> String {
    let keyword = keyword.to_lowercase();
    format!(
        "\
{title}

Today, we explore {keyword}.

This topic has captured the attention of millions because it offers insight, \
excitement, or curiosity.

Let's dive deep and uncover the stories, facts, and secrets behind {keyword}.

Stay tuned as we explore the most important points, the hidden gems, and the \
lessons you won't want to miss.
"
    )
}

fn napoleon_script(title: &str, keyword: &str) -> String {
    let keyword = keyword.to_lowercase();
    format!(
        "\
{title}

Europe was holding its breath.

What began as a calculated decision, made with confidence and ambition,
would soon evolve into one of history's most instructive moments.

At the center of this story lies {keyword}.

Power in Europe was not measured only in armies, but in perception.
To appear unstoppable was often enough to bend nations to your will.

And for a time, that illusion held.

But history resists certainty.

Supply lines stretched. Resistance hardened.
What once seemed inevitable slowly became fragile.

Then came the turning point.

Not a single defeat, but a realization.
Victory would no longer come swiftly.

When the dust settled, Europe was changed.

Borders shifted. Legends fractured.
And one truth remained:

Power is never permanent.
Even the greatest empires leave echoes behind.
"
    )
}

fn generic_thumbnail_prompt(title: &str) -> String {
    format!(
        "\
Ultra-cinematic YouTube thumbnail for \"{title}\" topic.

Central object or person representing \"{title}\" keyword.
Dynamic background representing excitement or mystery.
High contrast, cinematic lighting, ultra-realistic 8K detail.
No text included.
16:9 YouTube thumbnail.
"
    )
}

fn napoleon_thumbnail_prompt(title: &str) -> String {
    format!(
        "\
Ultra-cinematic YouTube thumbnail for a historical documentary.

Napoleon Bonaparte in dramatic three-quarter profile,
intense expression, bicorne hat, dark military coat.

Stormy European battlefield background,
smoke, distant cannons, collapsing flags.

High contrast cinematic lighting,
strong rim light on face,
dark moody shadows.

Ultra-realistic, painterly realism, 8K detail.
Sharp focus on face, blurred background.
No text included.

Emotion: power, downfall, fate.

16:9 YouTube thumbnail.
Inspired by Netflix historical documentaries.

Context title: \"{title}\"
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: [ScriptStyle; 2] = [ScriptStyle::Generic, ScriptStyle::Napoleon];

    #[test]
    fn scripts_are_total_and_fully_interpolated() {
        for style in STYLES {
            for (title, keyword) in [
                ("Why Napoleon failed", "Napoleonic Wars documentary"),
                ("", ""),
                ("A \"quoted\" title {with braces}", "Cars"),
            ] {
                let script = narration_script(style, title, keyword);
                assert!(!script.is_empty());
                assert!(script.contains(title));
                assert!(!script.contains("{keyword}"));
                assert!(!script.contains("{title}"));
            }
        }
    }

    #[test]
    fn prompts_interpolate_title_verbatim() {
        for style in STYLES {
            let prompt = thumbnail_prompt(style, "Battle of Waterloo explained");
            assert!(prompt.contains("\"Battle of Waterloo explained\""));
            assert!(prompt.contains("16:9 YouTube thumbnail"));
        }
    }

    #[test]
    fn prompts_are_total_on_empty_title() {
        for style in STYLES {
            assert!(!thumbnail_prompt(style, "").is_empty());
        }
    }

    #[test]
    fn keyword_is_lowercased_in_scripts() {
        let script = narration_script(ScriptStyle::Generic, "t", "HISTORY");
        assert!(script.contains("history"));
        assert!(!script.contains("HISTORY"));
    }

    #[test]
    fn napoleon_script_keeps_narrative_arc() {
        let script = narration_script(ScriptStyle::Napoleon, "The Peninsular War", "empires");
        assert!(script.starts_with("The Peninsular War"));
        assert!(script.contains("Europe was holding its breath."));
        assert!(script.contains("Power is never permanent."));
    }
}
