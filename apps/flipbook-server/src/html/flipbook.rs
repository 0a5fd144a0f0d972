//! Flipbook viewer document
//!
//! Renders a placed page sequence into a standalone HTML page driven by
//! turn.js. Output depends only on the arguments, so rendering the same
//! flipbook twice yields identical bytes.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::flipbook::{PageContent, PageSlot};
use crate::youtube::embed_url;

/// Viewer width in pixels
const BOOK_WIDTH: u32 = 800;
/// Viewer height in pixels
const BOOK_HEIGHT: u32 = 600;
/// Page-curl elevation used by turn.js
const TURN_ELEVATION: u32 = 50;

/// Leaf-side class for a page.
///
/// turn.js lays out odd pages on the right leaf, which the stylesheet calls
/// `even`; the naming is inverted relative to the page number.
pub fn parity_class(page_number: usize) -> &'static str {
    if page_number % 2 != 0 {
        "even"
    } else {
        "odd"
    }
}

/// Render the complete viewer document.
pub fn render_flipbook(flipbook_id: &str, pages: &[PageSlot]) -> String {
    let pages_html = pages
        .iter()
        .map(render_page)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>PDF Flipbook - {title}</title>
    <link rel="stylesheet" href="/static/style.css">
    <style>
        #book {{
            width: {width}px;
            height: {height}px;
            margin: 20px auto;
        }}
        .page-content {{
            width: 100%;
            height: 100%;
            display: flex;
            justify-content: center;
            align-items: center;
            padding: 20px;
            box-sizing: border-box;
        }}
        .page-content img {{
            max-height: 100%;
            max-width: 100%;
            object-fit: contain;
        }}
    </style>
</head>
<body>
    <script src="https://code.jquery.com/jquery-3.6.0.min.js"></script>
    <script src="/static/script.js"></script>

    <div id="book">
{pages}
    </div>

    <script>
        $(function() {{
            $('#book').turn({{
                width: {width},
                height: {height},
                autoCenter: true,
                display: 'double',
                acceleration: true,
                elevation: {elevation},
                gradients: true,
            }});
        }});
    </script>
</body>
</html>
"#,
        title = encode_text(flipbook_id),
        width = BOOK_WIDTH,
        height = BOOK_HEIGHT,
        elevation = TURN_ELEVATION,
        pages = pages_html,
    )
}

fn render_page(slot: &PageSlot) -> String {
    let content = match &slot.content {
        PageContent::Image(url) => format!(
            r#"<img src="{}" style="max-width: 100%; height: auto;" />"#,
            encode_double_quoted_attribute(url)
        ),
        PageContent::Video(video_id) => format!(
            r#"<iframe width="560" height="315"
                    src="{}"
                    frameborder="0" allowfullscreen>
                </iframe>"#,
            encode_double_quoted_attribute(&embed_url(video_id))
        ),
        PageContent::Blank => String::new(),
    };

    format!(
        r#"        <div class="page {parity}" id="page-{number}">
            <div class="page-content">
                {content}
            </div>
        </div>"#,
        parity = parity_class(slot.number),
        number = slot.number,
        content = content,
    )
}
