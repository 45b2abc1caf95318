use playlist_core::{parse_delimited, to_delimited, to_extended_m3u, ChannelRecord};
use pretty_assertions::assert_eq;

fn sample() -> Vec<ChannelRecord> {
    vec![
        ChannelRecord::new("CCTV-1", "http://1.2.3.4/live.m3u8"),
        ChannelRecord::new("湖南卫视", "udp://239.0.0.1:5140"),
        ChannelRecord::new("Phoenix HD", "rtsp://10.1.1.1/ch3"),
    ]
}

#[test]
fn extended_m3u_has_header_and_directive_pairs() {
    let m3u = to_extended_m3u(&sample());
    assert_eq!(
        m3u,
        "#EXTM3U\n\
         #EXTINF:-1,CCTV-1\n\
         http://1.2.3.4/live.m3u8\n\
         #EXTINF:-1,湖南卫视\n\
         udp://239.0.0.1:5140\n\
         #EXTINF:-1,Phoenix HD\n\
         rtsp://10.1.1.1/ch3\n"
    );
}

#[test]
fn extended_m3u_of_nothing_is_bare_header() {
    assert_eq!(to_extended_m3u(&[]), "#EXTM3U\n");
}

#[test]
fn delimited_is_one_line_per_record_in_order() {
    let txt = to_delimited(&sample());
    assert_eq!(
        txt,
        "CCTV-1,http://1.2.3.4/live.m3u8\n\
         湖南卫视,udp://239.0.0.1:5140\n\
         Phoenix HD,rtsp://10.1.1.1/ch3\n"
    );
}

#[test]
fn delimited_round_trips_to_same_pairs() {
    let channels = sample();
    let reparsed = parse_delimited(&to_delimited(&channels));
    assert_eq!(reparsed, channels);
}

#[test]
fn parse_delimited_skips_blank_lines() {
    let parsed = parse_delimited("a,http://a/1\n\n\nb,http://b/1\n");
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[1], ChannelRecord::new("b", "http://b/1"));
}

#[test]
fn parse_delimited_splits_on_first_comma_only() {
    let parsed = parse_delimited("name,http://host/a,b\n");
    assert_eq!(parsed, vec![ChannelRecord::new("name", "http://host/a,b")]);
}
