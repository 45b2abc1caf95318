use playlist_engine::extract_channels;
use pretty_assertions::assert_eq;

fn result_block(channel_html: &str, rest: &str) -> String {
    format!(
        "<html><body><div class=\"result\"><div class=\"channel\">{channel_html}</div>{rest}</div></body></html>"
    )
}

#[test]
fn copyto_payload_yields_channel() {
    let html = result_block(
        "<div class=\"tip\">CCTV-1</div>",
        "<img onclick=\"copyto('http://1.2.3.4/live.m3u8')\">",
    );
    let channels = extract_channels(&html);
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].name, "CCTV-1");
    assert_eq!(channels[0].address, "http://1.2.3.4/live.m3u8");
}

#[test]
fn tip_text_is_preferred_over_block_text() {
    let html = result_block(
        "Some surrounding text <div class=\"tip\"> CCTV-5 </div> trailing",
        "<img onclick=\"copyto('udp://239.0.0.1:5140')\">",
    );
    let channels = extract_channels(&html);
    assert_eq!(channels[0].name, "CCTV-5");
}

#[test]
fn block_text_fallback_collapses_whitespace() {
    let html = result_block(
        "  CCTV\n\t 新闻   频道 ",
        "<img onclick=\"copyto('http://1.2.3.4/news.m3u8')\">",
    );
    let channels = extract_channels(&html);
    assert_eq!(channels[0].name, "CCTV 新闻 频道");
}

#[test]
fn placeholder_blocks_are_rejected() {
    for placeholder in ["请使用搜索框查询", "需要验证", "来自 1.2.3.4", "组播源列表"] {
        let html = result_block(
            &format!("<div class=\"tip\">{placeholder}</div>"),
            "<img onclick=\"copyto('http://1.2.3.4/live.m3u8')\">",
        );
        assert!(
            extract_channels(&html).is_empty(),
            "accepted placeholder {placeholder}"
        );
    }
}

#[test]
fn empty_name_is_rejected() {
    let html = result_block(
        "<div class=\"tip\">   </div>",
        "<img onclick=\"copyto('http://1.2.3.4/live.m3u8')\">",
    );
    assert!(extract_channels(&html).is_empty());
}

#[test]
fn copyto_wins_over_address_table() {
    let html = result_block(
        "<div class=\"tip\">CCTV-1</div>",
        "<img onclick=\"copyto('http://copy.example/live.m3u8')\">\
         <div class=\"m3u8\"><table><tr><td>http://table.example/live.m3u8</td></tr></table></div>",
    );
    let channels = extract_channels(&html);
    assert_eq!(channels[0].address, "http://copy.example/live.m3u8");
}

#[test]
fn first_copyto_affordance_wins() {
    let html = result_block(
        "<div class=\"tip\">CCTV-1</div>",
        "<img onclick=\"copyto('http://first.example/a.m3u8')\">\
         <img onclick=\"copyto('http://second.example/b.m3u8')\">",
    );
    let channels = extract_channels(&html);
    assert_eq!(channels[0].address, "http://first.example/a.m3u8");
}

#[test]
fn table_fallback_takes_first_http_token() {
    let html = result_block(
        "<div class=\"tip\">CCTV-2</div>",
        "<div class=\"m3u8\"><table>\
         <tr><td>checked 2024-01-01</td></tr>\
         <tr><td>speed: http://10.0.0.1/live.m3u8 4.2MB/s</td></tr>\
         </table></div>",
    );
    let channels = extract_channels(&html);
    assert_eq!(channels[0].address, "http://10.0.0.1/live.m3u8");
}

#[test]
fn block_without_any_address_is_dropped() {
    let html = result_block("<div class=\"tip\">CCTV-3</div>", "<div class=\"m3u8\"></div>");
    assert!(extract_channels(&html).is_empty());
}

#[test]
fn unsupported_scheme_is_dropped() {
    let html = result_block(
        "<div class=\"tip\">CCTV-4</div>",
        "<img onclick=\"copyto('ftp://1.2.3.4/live.m3u8')\">",
    );
    assert!(extract_channels(&html).is_empty());
}

#[test]
fn blocks_emit_in_document_order() {
    let html = "<html><body>\
        <div class=\"result\"><div class=\"channel\"><div class=\"tip\">B</div></div>\
        <img onclick=\"copyto('http://b/1')\"></div>\
        <div class=\"result\"><div class=\"channel\"><div class=\"tip\">A</div></div>\
        <img onclick=\"copyto('http://a/1')\"></div>\
        </body></html>";
    let names: Vec<_> = extract_channels(html).into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn document_without_result_blocks_is_empty() {
    assert!(extract_channels("<html><body><p>nothing here</p></body></html>").is_empty());
}
