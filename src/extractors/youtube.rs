//! YouTube watch-page and playlist test cases.

use once_cell::sync::Lazy;

use crate::record::{CaseMap, CaseValue, TestCaseRecord};

fn int() -> CaseValue {
    CaseValue::type_marker("int")
}

/// Watch-page test cases, including URL-only and retired entries.
pub static TESTS: Lazy<Vec<TestCaseRecord>> = Lazy::new(|| {
    vec![
        TestCaseRecord::new()
            .with("url", "https://www.youtube.com/watch?v=BaW_jenozKc&t=1s&end=9")
            .with(
                "info_dict",
                CaseMap::new()
                    .with("id", "BaW_jenozKc")
                    .with("ext", "mp4")
                    .with("title", "youtube-dl test video \"'/\\ä↭𝕐")
                    .with("uploader", "Philipp Hagemeister")
                    .with("uploader_id", "phihag")
                    .with(
                        "uploader_url",
                        r"re:https?://(?:www\.)?youtube\.com/user/phihag",
                    )
                    .with("channel_id", "UCLqxVugv74EIW3VWh2NOa3Q")
                    .with(
                        "channel_url",
                        r"re:https?://(?:www\.)?youtube\.com/channel/UCLqxVugv74EIW3VWh2NOa3Q",
                    )
                    .with("upload_date", "20121002")
                    .with(
                        "description",
                        "test chars:  \"'/\\ä↭𝕐\ntest URL: https://github.com/rg3/youtube-dl/issues/1892\n\n\
                         This is a test video for youtube-dl.\n\n\
                         For more information, contact phihag@phihag.de .",
                    )
                    .with("categories", vec!["Science & Technology"])
                    .with("tags", vec!["youtube-dl"])
                    .with("duration", 10)
                    .with("view_count", int())
                    .with("like_count", int())
                    .with("dislike_count", int())
                    .with("start_time", 1)
                    .with("end_time", 9),
            ),
        TestCaseRecord::new()
            .with("url", "//www.YouTube.com/watch?v=yZIXLfi8CZQ")
            .with("only_matching", true),
        TestCaseRecord::new()
            .with("url", "https://www.youtube.com/watch?v=UxxajLWwzqY")
            .with("note", "Test generic use_cipher_signature video (#897)")
            .with(
                "info_dict",
                CaseMap::new()
                    .with("id", "UxxajLWwzqY")
                    .with("ext", "mp4")
                    .with("upload_date", "20120506")
                    .with(
                        "title",
                        "Icona Pop - I Love It (feat. Charli XCX) [OFFICIAL VIDEO]",
                    )
                    .with("alt_title", "I Love It (feat. Charli XCX)")
                    .with("description", "md5:19a2f98d9032b9311e686ed039564f63")
                    .with(
                        "tags",
                        vec![
                            "Icona Pop i love it",
                            "sweden",
                            "pop music",
                            "big beat records",
                            "big beat",
                            "charli",
                            "xcx",
                            "charli xcx",
                            "girls",
                            "hbo",
                            "i love it",
                            "i don't care",
                            "icona",
                            "pop",
                            "iconic ep",
                            "iconic",
                            "love",
                            "it",
                        ],
                    )
                    .with("duration", 180)
                    .with("uploader", "Icona Pop")
                    .with("uploader_id", "IconaPop")
                    .with(
                        "uploader_url",
                        r"re:https?://(?:www\.)?youtube\.com/user/IconaPop",
                    )
                    .with("creator", "Icona Pop")
                    .with("track", "I Love It (feat. Charli XCX)")
                    .with("artist", "Icona Pop"),
            ),
        TestCaseRecord::new()
            .with("url", "https://www.youtube.com/watch?v=07FYdnEawAQ")
            .with("note", "Test VEVO video with age protection (#956)")
            .with(
                "info_dict",
                CaseMap::new()
                    .with("id", "07FYdnEawAQ")
                    .with("ext", "mp4")
                    .with("upload_date", "20130703")
                    .with(
                        "title",
                        "Justin Timberlake - Tunnel Vision (Official Music Video) (Explicit)",
                    )
                    .with("alt_title", "Tunnel Vision")
                    .with("description", "md5:07dab3356cde4199048e4c7cd93471e1")
                    .with("duration", 419)
                    .with("uploader", "justintimberlakeVEVO")
                    .with("uploader_id", "justintimberlakeVEVO")
                    .with(
                        "uploader_url",
                        r"re:https?://(?:www\.)?youtube\.com/user/justintimberlakeVEVO",
                    )
                    .with("creator", "Justin Timberlake")
                    .with("track", "Tunnel Vision")
                    .with("artist", "Justin Timberlake")
                    .with("age_limit", 18),
            ),
        TestCaseRecord::new()
            .with("url", "https://www.youtube.com/watch?v=a9LDPn-MO4I")
            .with("note", "256k DASH audio (format 141) via DASH manifest")
            .with(
                "info_dict",
                CaseMap::new()
                    .with("id", "a9LDPn-MO4I")
                    .with("ext", "m4a")
                    .with("upload_date", "20121002")
                    .with("uploader_id", "8KVIDEO")
                    .with(
                        "uploader_url",
                        r"re:https?://(?:www\.)?youtube\.com/user/8KVIDEO",
                    )
                    .with("description", "")
                    .with("uploader", "8KVIDEO")
                    .with("title", "UHDTV TEST 8K VIDEO.mp4"),
            )
            .with(
                "params",
                CaseMap::new()
                    .with("youtube_include_dash_manifest", true)
                    .with("format", "141"),
            )
            .with("skip", "format 141 not served anymore"),
        TestCaseRecord::new()
            .with("url", "https://www.youtube.com/watch?v=IB3lcPjvWLA")
            .with("note", "DASH manifest with encrypted signature")
            .with(
                "info_dict",
                CaseMap::new()
                    .with("id", "IB3lcPjvWLA")
                    .with("ext", "m4a")
                    .with(
                        "title",
                        "Afrojack, Spree Wilson - The Spark (Official Music Video) ft. Spree Wilson",
                    )
                    .with("description", "md5:8f5e2b82460520b619ccac1f509d43bf")
                    .with("duration", 244)
                    .with("uploader", "AfrojackVEVO")
                    .with("uploader_id", "AfrojackVEVO")
                    .with("upload_date", "20131011")
                    .with("abr", 129.495),
            )
            .with(
                "params",
                CaseMap::new()
                    .with("youtube_include_dash_manifest", true)
                    .with("format", "141/bestaudio[ext=m4a]"),
            ),
        TestCaseRecord::new()
            .with("url", "https://www.youtube.com/watch?v=6kLq3WMV1nU")
            .with("note", "Video with yt:stretch=17:0")
            .with(
                "info_dict",
                CaseMap::new()
                    .with("id", "6kLq3WMV1nU")
                    .with("ext", "webm")
                    .with("title", "Dedication To My Ex (Miss That) (Lyric Video)")
                    .with("description", "md5:33765bb339e1b47e7e72b5490139bb41")
                    .with("duration", 246)
                    .with("uploader", "LloydVEVO")
                    .with("uploader_id", "LloydVEVO")
                    .with("upload_date", "20110629"),
            )
            .with("params", CaseMap::new().with("skip_download", true))
            .with("skip", "This video does not exist."),
        TestCaseRecord::new()
            .with("url", "https://www.youtube.com/watch?v=Tq92D6wQ1mg")
            .with("note", "Age-gated video with embed allowed in public site")
            .with(
                "info_dict",
                CaseMap::new()
                    .with("id", "Tq92D6wQ1mg")
                    .with("ext", "mp4")
                    .with("title", "[MMD] Adios - EVERGLOW [+Motion DL]")
                    .with("description", "md5:17eccca93a786d51bc67646756894066")
                    .with("upload_date", "20191228")
                    .with("uploader_id", "UC1yoRdFoFJaCY-AGfD9W0wQ")
                    .with("uploader", "Projekt Melody")
                    .with("age_limit", 18)
                    .with("duration", 106)
                    .with("view_count", int()),
            )
            .with("params", CaseMap::new().with("skip_download", true)),
        TestCaseRecord::new()
            .with("url", "https://www.youtube.com/embed/CsmdDsKjzN8")
            .with("only_matching", true),
    ]
});

/// Playlist test cases.
pub static PLAYLIST_TESTS: Lazy<Vec<TestCaseRecord>> = Lazy::new(|| {
    vec![
        TestCaseRecord::new()
            .with(
                "url",
                "https://www.youtube.com/playlist?list=PLwiyx1dc3P2JR9N8gQaQN_BCvlSlap7re",
            )
            .with(
                "info_dict",
                CaseMap::new()
                    .with("title", "ytdl test PL")
                    .with("id", "PLwiyx1dc3P2JR9N8gQaQN_BCvlSlap7re")
                    .with("uploader", "Sergey M.")
                    .with("uploader_id", "UCmlqkdCBesrv2Lak1mF_MxA"),
            )
            .with("playlist_count", 3),
        TestCaseRecord::new()
            .with(
                "url",
                "https://www.youtube.com/playlist?list=PLtPgu7CB4gbY9oDN3drwC3cMbJggS7dKl",
            )
            .with("note", "issue #673")
            .with(
                "info_dict",
                CaseMap::new()
                    .with("id", "PLtPgu7CB4gbY9oDN3drwC3cMbJggS7dKl")
                    .with("title", "Team Fortress 2 (Class-based LP)"),
            )
            .with("playlist_mincount", 8)
            .with("skip", "playlist was removed"),
        TestCaseRecord::new()
            .with(
                "url",
                "https://www.youtube.com/watch?v=FqZTN594JQw&list=PLMYEtVRpaqY00V9W81Cwmzp6N6vZqfUKD4",
            )
            .with("only_matching", true),
    ]
});

pub fn watch_cases() -> &'static [TestCaseRecord] {
    TESTS.as_slice()
}

pub fn playlist_cases() -> &'static [TestCaseRecord] {
    PLAYLIST_TESTS.as_slice()
}
