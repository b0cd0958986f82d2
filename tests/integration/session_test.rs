// tests/integration/session_test.rs

//! Drives complete sessions against a fake server over TCP.

use super::test_helpers::{FakeServer, GREETING, SHOW_DB_REPLY, SHOW_STRAT_REPLY};
use dictclient::{Database, DictConnection, DictError, ErrorKind, MatchingStrategy};

#[tokio::test]
async fn test_full_session() {
    let server = FakeServer::start(
        GREETING,
        &[
            ("SHOW DB", SHOW_DB_REPLY),
            ("SHOW STRAT", SHOW_STRAT_REPLY),
            (
                "MATCH * prefix \"lex\"",
                "152 2 matches found\r\nwn \"lexicon\"\r\ngcide \"lexical\"\r\n.\r\n250 ok\r\n",
            ),
            (
                "DEFINE * \"lexicon\"",
                "150 1 definitions retrieved\r\n\
151 \"lexicon\" wn \"WordNet (r) 3.0 (2006)\"\r\n\
lexicon\r\n\
.\r\n\
250 ok\r\n",
            ),
        ],
    )
    .await;

    let connection = DictConnection::connect(&server.config()).await.unwrap();
    assert!(connection.is_connected().await);

    let databases = connection.database_list().await.unwrap();
    assert_eq!(databases.len(), 2);
    assert_eq!(databases[1].name(), "gcide");

    let strategies = connection.strategy_list().await.unwrap();
    assert!(strategies.contains(&MatchingStrategy::new("prefix", "Match prefixes")));

    let prefix = MatchingStrategy::new("prefix", "Match prefixes");
    let words = connection
        .match_list(Some("lex"), Some(&prefix), Some(&Database::all()))
        .await
        .unwrap();
    assert_eq!(words.len(), 2);

    let definitions = connection
        .definitions(Some("lexicon"), Some(&Database::all()))
        .await
        .unwrap();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].body(), "lexicon");
    assert_eq!(definitions[0].database(), &databases[0]);

    connection.close().await;
    assert!(!connection.is_connected().await);

    // SHOW DB was sent once; DEFINE reused the cache.
    let received = server.received().await;
    assert_eq!(
        received,
        vec![
            "SHOW DB",
            "SHOW STRAT",
            "MATCH * prefix \"lex\"",
            "DEFINE * \"lexicon\"",
            "QUIT"
        ]
    );
}

#[tokio::test]
async fn test_define_fetches_databases_first() {
    let server = FakeServer::start(
        GREETING,
        &[
            ("SHOW DB", SHOW_DB_REPLY),
            ("DEFINE gcide \"xyzzy\"", "552 No match\r\n"),
        ],
    )
    .await;

    let connection = DictConnection::connect(&server.config()).await.unwrap();
    let gcide = Database::new("gcide", "");
    let definitions = connection
        .definitions(Some("xyzzy"), Some(&gcide))
        .await
        .unwrap();
    assert!(definitions.is_empty());
    connection.close().await;

    assert_eq!(
        server.received().await,
        vec!["SHOW DB", "DEFINE gcide \"xyzzy\"", "QUIT"]
    );
}

#[tokio::test]
async fn test_refused_greeting() {
    let server = FakeServer::start("530 access denied", &[]).await;

    let result = DictConnection::connect(&server.config()).await;
    let Err(err) = result else {
        panic!("Expected the handshake to fail");
    };
    assert!(matches!(err, DictError::Connection(_)));
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(err.to_string().contains("530"));
}

#[tokio::test]
async fn test_connect_to_default_config_port() {
    let server = FakeServer::start(GREETING, &[]).await;

    let connection = DictConnection::connect_to("127.0.0.1", server.port)
        .await
        .unwrap();
    connection.close().await;
    assert_eq!(server.received().await, vec!["QUIT"]);
}
