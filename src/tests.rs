#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicU32, Ordering},
            Arc, Mutex,
        },
        time::Duration,
    };

    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;
    use tokio::{sync::mpsc, time::Instant};

    use crate::{
        api::{
            build_http_client,
            catalog::Catalog,
            error::{ApiError, ApiResult},
            gemini::{parse_generated_text, Gemini},
            types::{unique_by_id, Album, AlbumDetails, ArtistRef, Artists, SearchResponse, Song},
            youtube::{parse_video_id, video_query},
        },
        app::{
            debounce::{sleep_until, Debouncer},
            state::{
                format_total_duration, greeting, truncate_str, ActiveScreen, AppState, Entry,
                Notification, SearchFilter, SearchState, MAX_ALBUM_CARDS, MOOD_ANALYSIS_FAILED,
            },
            App, AppMessage,
        },
        config::Config,
        events::{map_key_to_action, UserAction},
        mood::{
            all_moods,
            classifier::{build_prompt, MoodClassifier, TextGenerator},
            detect_by_keywords, Mood,
        },
        player::{
            backend::{spawn_worker, BackendCommand, BackendEvent, PlaybackBackend},
            format_time, PlaybackState, PlayerCommand, PlayerEffect, PlayerState, PlayerStatus,
            DEFAULT_VOLUME,
        },
    };

    fn song(id: &str, secs: u32) -> Song {
        Song {
            id: id.to_string(),
            name: format!("Song {id}"),
            duration: Some(secs),
            ..Default::default()
        }
    }

    fn album(id: &str) -> Album {
        Album {
            id: id.to_string(),
            name: format!("Album {id}"),
            ..Default::default()
        }
    }

    fn playing(current: &Song, recommendations: &[Song]) -> PlayerState {
        let mut player = PlayerState::default();
        player.apply(PlayerCommand::SetRecommendations(recommendations.to_vec()));
        player.apply(PlayerCommand::Play(current.clone()));
        player.apply(PlayerCommand::StreamResolved {
            song_id: current.id.clone(),
            video_id: Some(format!("v-{}", current.id)),
        });
        player
    }

    fn current_id(player: &PlayerState) -> Option<&str> {
        player.current.as_ref().map(|s| s.id.as_str())
    }

    // ── Mood keywords ─────────────────────────────────────────────────────────

    #[test]
    fn test_keywords_detect_each_mood() {
        assert_eq!(detect_by_keywords("I am so excited today").mood, Mood::Happy);
        assert_eq!(detect_by_keywords("feeling blue").mood, Mood::Sad);
        assert_eq!(detect_by_keywords("time for a WORKOUT").mood, Mood::Energetic);
        assert_eq!(detect_by_keywords("just want to relax").mood, Mood::Chill);
        assert_eq!(detect_by_keywords("date night").mood, Mood::Romantic);
        assert_eq!(detect_by_keywords("need to study").mood, Mood::Focus);
    }

    #[test]
    fn test_keywords_first_group_wins() {
        // "sad" and "study" both match; the sad group is checked first.
        assert_eq!(detect_by_keywords("sad that I have to study").mood, Mood::Sad);
        assert_eq!(detect_by_keywords("happy but tired of this workout").mood, Mood::Happy);
    }

    #[test]
    fn test_keywords_default_to_happy() {
        let result = detect_by_keywords("the weather is ok");
        assert_eq!(result.mood, Mood::Happy);
        assert_eq!(detect_by_keywords("").mood, Mood::Happy);
        assert!((result.confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_profiles_are_complete() {
        let moods = all_moods();
        assert_eq!(moods.len(), 6);
        for m in &moods {
            assert_eq!(m.related_genres.len(), 3);
            assert_eq!(m.color_theme, m.mood.to_string().to_lowercase());
        }
        assert_eq!(Mood::Energetic.album_query(), "party");
        assert_eq!(Mood::Focus.album_query(), "meditation");
        assert_eq!(Mood::Chill.song_query(), "chill relax");
    }

    #[test]
    fn test_from_label_tolerates_noise() {
        assert_eq!(Mood::from_label("Happy"), Some(Mood::Happy));
        assert_eq!(Mood::from_label("  chill.\n"), Some(Mood::Chill));
        assert_eq!(Mood::from_label("Mood: FOCUS"), Some(Mood::Focus));
        assert_eq!(Mood::from_label("sad sad"), Some(Mood::Sad));
    }

    #[test]
    fn test_from_label_rejects_unknown_or_ambiguous() {
        assert_eq!(Mood::from_label("melancholic"), None);
        assert_eq!(Mood::from_label(""), None);
        assert_eq!(Mood::from_label("happy or sad"), None);
    }

    #[test]
    fn test_prompt_lists_every_label() {
        let prompt = build_prompt("  what a \"day\" ");
        for m in all_moods() {
            assert!(prompt.contains(&m.mood.to_string()));
        }
        assert!(prompt.contains("what a 'day'"));
    }

    // ── Mood classifier ───────────────────────────────────────────────────────

    struct FakeGenerator {
        replies: Mutex<VecDeque<ApiResult<String>>>,
        calls: AtomicU32,
        configured: bool,
    }

    impl FakeGenerator {
        fn new(replies: Vec<ApiResult<String>>) -> Self {
            FakeGenerator {
                replies: Mutex::new(replies.into()),
                calls: AtomicU32::new(0),
                configured: true,
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate(&self, _prompt: &str) -> ApiResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ApiError::EmptyResponse("fake")))
        }
    }

    fn classifier(replies: Vec<ApiResult<String>>) -> MoodClassifier<FakeGenerator> {
        MoodClassifier::new(FakeGenerator::new(replies)).with_retry_base(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_classifier_uses_model_label() {
        let c = classifier(vec![Ok("Romantic".to_string())]);
        let result = c.classify("I am so happy").await;
        assert_eq!(result.mood, Mood::Romantic);
        assert_eq!(result.color_theme, "romantic");
    }

    #[tokio::test]
    async fn test_classifier_falls_back_on_unknown_label() {
        let c = classifier(vec![Ok("melancholic".to_string())]);
        assert_eq!(c.classify("need to study").await.mood, Mood::Focus);
    }

    #[tokio::test]
    async fn test_classifier_retries_then_succeeds() {
        let c = classifier(vec![
            Err(ApiError::EmptyResponse("fake")),
            Ok("sad".to_string()),
        ]);
        assert_eq!(c.classify("whatever").await.mood, Mood::Sad);
    }

    #[tokio::test]
    async fn test_classifier_gives_up_after_three_attempts() {
        let c = classifier(vec![
            Err(ApiError::EmptyResponse("fake")),
            Err(ApiError::MissingKey("fake")),
            Err(ApiError::EmptyResponse("fake")),
            Ok("Sad".to_string()),
        ]);
        assert_eq!(c.classify("let's relax").await.mood, Mood::Chill);
    }

    #[tokio::test]
    async fn test_classifier_counts_attempts() {
        let generator = Arc::new(FakeGenerator::new(vec![]));
        let c = MoodClassifier::new(SharedGenerator(generator.clone())).with_retry_base(Duration::ZERO);
        c.classify("pumped").await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_classifier_skips_unconfigured_model() {
        let generator = Arc::new(FakeGenerator {
            configured: false,
            ..FakeGenerator::new(vec![Ok("Sad".to_string())])
        });
        let c = MoodClassifier::new(SharedGenerator(generator.clone()));
        assert_eq!(c.classify("so excited").await.mood, Mood::Happy);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_classifier_skips_blank_text() {
        let generator = Arc::new(FakeGenerator::new(vec![Ok("Sad".to_string())]));
        let c = MoodClassifier::new(SharedGenerator(generator.clone()));
        assert_eq!(c.classify("   ").await.mood, Mood::Happy);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_classifier_without_gemini_key_uses_keywords() {
        let http = build_http_client(&Config::default()).unwrap();
        let gemini = Gemini::new(http, "http://127.0.0.1:9", "gemini-1.5-flash", None);
        let c = MoodClassifier::new(gemini);
        assert_eq!(c.classify("feeling depressed").await.mood, Mood::Sad);
    }

    struct SharedGenerator(Arc<FakeGenerator>);

    #[async_trait]
    impl TextGenerator for SharedGenerator {
        fn is_configured(&self) -> bool {
            self.0.is_configured()
        }

        async fn generate(&self, prompt: &str) -> ApiResult<String> {
            self.0.generate(prompt).await
        }
    }

    // ── Player: play / select ─────────────────────────────────────────────────

    #[test]
    fn test_play_resets_and_resolves() {
        let mut player = PlayerState::default();
        player.progress = 42;
        let s = song("a", 200);
        let effects = player.apply(PlayerCommand::Play(s.clone()));
        assert_eq!(effects, vec![PlayerEffect::ResolveStream(s)]);
        assert_eq!(player.state, PlaybackState::Playing);
        assert_eq!(player.progress, 0);
        assert!(player.video_id.is_none());
    }

    #[test]
    fn test_select_current_toggles() {
        let s = song("a", 200);
        let mut player = playing(&s, &[]);
        assert_eq!(player.apply(PlayerCommand::Select(s.clone())), vec![PlayerEffect::Pause]);
        assert_eq!(player.state, PlaybackState::Paused);
        assert_eq!(player.apply(PlayerCommand::Select(s)), vec![PlayerEffect::Resume]);
        assert!(player.is_playing());
    }

    #[test]
    fn test_pause_without_song_is_noop() {
        let mut player = PlayerState::default();
        assert!(player.apply(PlayerCommand::TogglePlay).is_empty());
        assert_eq!(player.state, PlaybackState::Idle);
    }

    // ── Player: next / previous ───────────────────────────────────────────────

    #[test]
    fn test_next_prefers_queue_in_fifo_order() {
        let recs = vec![song("r1", 100), song("r2", 100)];
        let mut player = playing(&recs[0], &recs);
        player.apply(PlayerCommand::Enqueue(song("q1", 100)));
        player.apply(PlayerCommand::Enqueue(song("q2", 100)));

        player.apply(PlayerCommand::Next);
        assert_eq!(current_id(&player), Some("q1"));
        player.apply(PlayerCommand::Next);
        assert_eq!(current_id(&player), Some("q2"));
        assert!(player.queue.is_empty());
    }

    #[test]
    fn test_next_wraps_recommendations() {
        let recs = vec![song("r1", 100), song("r2", 100), song("r3", 100)];
        let mut player = playing(&recs[2], &recs);
        player.apply(PlayerCommand::Next);
        assert_eq!(current_id(&player), Some("r1"));
    }

    #[test]
    fn test_next_from_outside_recommendations_starts_at_top() {
        let recs = vec![song("r1", 100), song("r2", 100)];
        let mut player = playing(&song("search", 100), &recs);
        player.apply(PlayerCommand::Next);
        assert_eq!(current_id(&player), Some("r1"));
    }

    #[test]
    fn test_next_without_anything_is_noop() {
        let mut player = PlayerState::default();
        assert!(player.apply(PlayerCommand::Next).is_empty());
        assert!(player.current.is_none());

        let recs = vec![song("r1", 100)];
        player.apply(PlayerCommand::SetRecommendations(recs));
        assert!(player.apply(PlayerCommand::Next).is_empty());
        assert!(player.current.is_none());
    }

    #[test]
    fn test_previous_restarts_after_threshold() {
        let recs = vec![song("r1", 100), song("r2", 100)];
        let mut player = playing(&recs[1], &recs);
        player.apply(PlayerCommand::Progress(30));
        assert_eq!(player.apply(PlayerCommand::Previous), vec![PlayerEffect::Seek(0)]);
        assert_eq!(player.progress, 0);
        assert_eq!(current_id(&player), Some("r2"));
    }

    #[test]
    fn test_previous_wraps_backwards() {
        let recs = vec![song("r1", 100), song("r2", 100), song("r3", 100)];
        let mut player = playing(&recs[0], &recs);
        player.apply(PlayerCommand::Previous);
        assert_eq!(current_id(&player), Some("r3"));
        player.apply(PlayerCommand::Previous);
        assert_eq!(current_id(&player), Some("r2"));
    }

    #[test]
    fn test_previous_from_outside_recommendations_plays_last() {
        let recs = vec![song("r1", 100), song("r2", 100), song("r3", 100)];
        let mut player = playing(&song("search", 100), &recs);
        player.apply(PlayerCommand::Previous);
        assert_eq!(current_id(&player), Some("r3"));
    }

    #[test]
    fn test_ended_status_advances() {
        let recs = vec![song("r1", 100), song("r2", 100)];
        let mut player = playing(&recs[0], &recs);
        let effects = player.apply(PlayerCommand::Status(PlayerStatus::Ended));
        assert_eq!(
            effects,
            vec![PlayerEffect::Stop, PlayerEffect::ResolveStream(recs[1].clone())]
        );
        assert_eq!(player.last_status, Some(PlayerStatus::Ended));

        player.apply(PlayerCommand::StreamResolved { song_id: "r2".into(), video_id: Some("v2".into()) });
        player.apply(PlayerCommand::Pause);
        assert_eq!(player.apply(PlayerCommand::Resume), vec![PlayerEffect::Resume]);
    }

    #[test]
    fn test_switching_songs_stops_loaded_stream() {
        let recs = vec![song("r1", 100), song("r2", 100)];
        let mut player = playing(&song("a", 100), &recs);
        let b = song("b", 100);

        let effects = player.apply(PlayerCommand::Play(b.clone()));
        assert_eq!(effects, vec![PlayerEffect::Stop, PlayerEffect::ResolveStream(b.clone())]);

        // Nothing was loaded for b yet, so picking another song needs no stop.
        let c = song("c", 100);
        assert_eq!(player.apply(PlayerCommand::Play(c.clone())), vec![PlayerEffect::ResolveStream(c)]);
    }

    #[test]
    fn test_previous_song_events_ignored_while_resolving() {
        let recs = vec![song("r1", 100), song("r2", 100)];
        let mut player = playing(&song("a", 100), &recs);
        player.apply(PlayerCommand::Play(song("b", 100)));

        player.apply(PlayerCommand::Progress(42));
        assert_eq!(player.progress, 0);

        assert!(player.apply(PlayerCommand::Status(PlayerStatus::Ended)).is_empty());
        assert_eq!(current_id(&player), Some("b"));

        let effects = player.apply(PlayerCommand::StreamResolved { song_id: "b".into(), video_id: None });
        assert!(effects.is_empty());
        assert_eq!(player.state, PlaybackState::Paused);
        assert!(player.apply(PlayerCommand::Status(PlayerStatus::Ended)).is_empty());
        assert_eq!(current_id(&player), Some("b"));
    }

    #[test]
    fn test_ended_with_nothing_next_pauses_and_replays() {
        let mut player = playing(&song("a", 100), &[]);
        player.apply(PlayerCommand::Progress(99));

        assert!(player.apply(PlayerCommand::Status(PlayerStatus::Ended)).is_empty());
        assert_eq!(player.state, PlaybackState::Paused);
        assert_eq!(player.progress, 100);

        assert_eq!(player.apply(PlayerCommand::TogglePlay), vec![PlayerEffect::Load("v-a".into())]);
        assert!(player.is_playing());
        assert_eq!(player.progress, 0);
        assert_eq!(player.apply(PlayerCommand::TogglePlay), vec![PlayerEffect::Pause]);
        assert_eq!(player.apply(PlayerCommand::TogglePlay), vec![PlayerEffect::Resume]);
    }

    #[cfg(unix)]
    #[test]
    fn test_seek_while_paused_stays_paused() {
        use crate::player::mpv::translate_event;

        let mut player = playing(&song("a", 100), &[]);
        player.apply(PlayerCommand::Pause);
        player.apply(PlayerCommand::Seek(30));

        let Some(BackendEvent::Status(status)) = translate_event(&json!({"event": "playback-restart"})) else {
            panic!("playback-restart should map to a status");
        };
        player.apply(PlayerCommand::Status(status));
        assert_eq!(player.state, PlaybackState::Paused);
        assert_eq!(player.progress, 30);
    }

    #[test]
    fn test_status_syncs_play_state() {
        let s = song("a", 100);
        let mut player = playing(&s, &[]);
        player.apply(PlayerCommand::Status(PlayerStatus::Paused));
        assert_eq!(player.state, PlaybackState::Paused);
        player.apply(PlayerCommand::Status(PlayerStatus::Buffering));
        assert_eq!(player.state, PlaybackState::Paused);
        player.apply(PlayerCommand::Status(PlayerStatus::Playing));
        assert!(player.is_playing());
    }

    #[test]
    fn test_status_codes() {
        for code in [-1, 0, 1, 2, 3, 5] {
            let status = PlayerStatus::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
        assert_eq!(PlayerStatus::from_code(4), None);
    }

    // ── Player: seek / progress / volume ──────────────────────────────────────

    #[test]
    fn test_seek_outside_song_is_rejected() {
        let mut player = playing(&song("a", 120), &[]);
        assert!(player.apply(PlayerCommand::Seek(500)).is_empty());
        assert_eq!(player.progress, 0);
        assert_eq!(player.apply(PlayerCommand::Seek(120)), vec![PlayerEffect::Seek(120)]);
        assert_eq!(player.progress, 120);
    }

    #[test]
    fn test_progress_reports_are_clamped() {
        let mut player = playing(&song("a", 120), &[]);
        player.apply(PlayerCommand::Progress(130));
        assert_eq!(player.progress, 120);
        assert_eq!(player.progress_percent(), 1.0);
    }

    #[test]
    fn test_progress_formatted() {
        let mut player = playing(&song("a", 213), &[]);
        player.apply(PlayerCommand::Progress(90));
        assert_eq!(player.progress_formatted(), "1:30 / 3:33");
        assert_eq!(format_time(5), "0:05");
    }

    #[test]
    fn test_progress_percent_zero_duration() {
        let player = playing(&song("a", 0), &[]);
        assert_eq!(player.progress_percent(), 0.0);
    }

    #[test]
    fn test_volume_is_clamped_and_zero_mutes() {
        let mut player = PlayerState::default();
        assert_eq!(player.apply(PlayerCommand::SetVolume(150)), vec![PlayerEffect::Volume(100)]);
        assert!(!player.muted);
        player.apply(PlayerCommand::SetVolume(0));
        assert!(player.muted);
    }

    #[test]
    fn test_toggle_mute_restores_volume() {
        let mut player = PlayerState::default();
        player.apply(PlayerCommand::SetVolume(40));
        assert_eq!(player.apply(PlayerCommand::ToggleMute), vec![PlayerEffect::Volume(0)]);
        assert_eq!(player.volume, 40);
        assert_eq!(player.apply(PlayerCommand::ToggleMute), vec![PlayerEffect::Volume(40)]);

        player.apply(PlayerCommand::SetVolume(0));
        player.apply(PlayerCommand::ToggleMute);
        assert_eq!(player.volume, DEFAULT_VOLUME);
        assert!(!player.muted);
    }

    // ── Player: queue / streams ───────────────────────────────────────────────

    #[test]
    fn test_queue_remove_and_clear() {
        let mut player = PlayerState::default();
        for id in ["a", "b", "c"] {
            player.apply(PlayerCommand::Enqueue(song(id, 10)));
        }
        player.apply(PlayerCommand::RemoveFromQueue(1));
        let ids: Vec<&str> = player.queue.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        player.apply(PlayerCommand::RemoveFromQueue(9));
        assert_eq!(player.queue.len(), 2);
        player.apply(PlayerCommand::ClearQueue);
        assert!(player.queue.is_empty());
    }

    #[test]
    fn test_stream_resolved_loads_current() {
        let mut player = playing(&song("a", 100), &[]);
        let effects = player.apply(PlayerCommand::StreamResolved {
            song_id: "a".into(),
            video_id: Some("vid".into()),
        });
        assert_eq!(effects, vec![PlayerEffect::Load("vid".into())]);
        assert_eq!(player.video_id.as_deref(), Some("vid"));
    }

    #[test]
    fn test_stale_stream_is_ignored() {
        let mut player = playing(&song("a", 100), &[]);
        player.apply(PlayerCommand::Play(song("b", 100)));
        let effects = player.apply(PlayerCommand::StreamResolved {
            song_id: "a".into(),
            video_id: Some("old".into()),
        });
        assert!(effects.is_empty());
        assert!(player.video_id.is_none());
    }

    #[test]
    fn test_missing_stream_pauses() {
        let mut player = playing(&song("a", 100), &[]);
        player.apply(PlayerCommand::StreamResolved { song_id: "a".into(), video_id: None });
        assert_eq!(player.state, PlaybackState::Paused);
    }

    // ── Playback worker ───────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingBackend {
        log: Mutex<Vec<String>>,
        fail_seek: bool,
    }

    #[async_trait]
    impl PlaybackBackend for RecordingBackend {
        async fn load(&self, video_id: &str) -> anyhow::Result<()> {
            self.log.lock().unwrap().push(format!("load {video_id}"));
            Ok(())
        }
        async fn stop(&self) -> anyhow::Result<()> {
            self.log.lock().unwrap().push("stop".into());
            Ok(())
        }
        async fn pause(&self) -> anyhow::Result<()> {
            self.log.lock().unwrap().push("pause".into());
            Ok(())
        }
        async fn resume(&self) -> anyhow::Result<()> {
            self.log.lock().unwrap().push("resume".into());
            Ok(())
        }
        async fn seek(&self, secs: u32) -> anyhow::Result<()> {
            if self.fail_seek {
                anyhow::bail!("seek refused");
            }
            self.log.lock().unwrap().push(format!("seek {secs}"));
            Ok(())
        }
        async fn set_volume(&self, percent: u8) -> anyhow::Result<()> {
            self.log.lock().unwrap().push(format!("volume {percent}"));
            Ok(())
        }
        async fn request_position(&self) -> anyhow::Result<()> {
            self.log.lock().unwrap().push("position".into());
            Ok(())
        }
        async fn shutdown(&self) {
            self.log.lock().unwrap().push("shutdown".into());
        }
    }

    #[tokio::test]
    async fn test_worker_runs_commands_in_order() {
        let backend = Arc::new(RecordingBackend::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let (events_tx, _events_rx) = mpsc::channel(8);
        let worker = spawn_worker(backend.clone(), rx, events_tx);

        tx.send(BackendCommand::Load("v1".into())).unwrap();
        tx.send(BackendCommand::Volume(30)).unwrap();
        tx.send(BackendCommand::Pause).unwrap();
        tx.send(BackendCommand::Stop).unwrap();
        drop(tx);
        worker.await.unwrap();

        let log = backend.log.lock().unwrap().clone();
        assert_eq!(log, vec!["load v1", "volume 30", "pause", "stop", "shutdown"]);
    }

    #[tokio::test]
    async fn test_worker_reports_failures() {
        let backend = Arc::new(RecordingBackend { fail_seek: true, ..Default::default() });
        let (tx, rx) = mpsc::unbounded_channel();
        let (events_tx, mut events_rx) = mpsc::channel(8);
        let worker = spawn_worker(backend.clone(), rx, events_tx);

        tx.send(BackendCommand::Seek(10)).unwrap();
        tx.send(BackendCommand::Resume).unwrap();
        drop(tx);
        worker.await.unwrap();

        assert_eq!(events_rx.recv().await, Some(BackendEvent::Error("seek refused".into())));
        let log = backend.log.lock().unwrap().clone();
        assert_eq!(log, vec!["resume", "shutdown"]);
    }

    // ── mpv IPC events ────────────────────────────────────────────────────────

    #[cfg(unix)]
    #[test]
    fn test_translate_mpv_events() {
        use crate::player::mpv::translate_event;

        assert_eq!(
            translate_event(&json!({"event": "end-file", "reason": "eof"})),
            Some(BackendEvent::Status(PlayerStatus::Ended))
        );
        assert_eq!(translate_event(&json!({"event": "end-file", "reason": "stop"})), None);
        assert_eq!(
            translate_event(&json!({"event": "end-file", "reason": "error", "file_error": "unrecognized file format"})),
            Some(BackendEvent::Error("unrecognized file format".into()))
        );
        assert_eq!(
            translate_event(&json!({"event": "property-change", "name": "pause", "data": true})),
            Some(BackendEvent::Status(PlayerStatus::Paused))
        );
        assert_eq!(
            translate_event(&json!({"event": "playback-restart"})),
            Some(BackendEvent::Status(PlayerStatus::Cued))
        );
        assert_eq!(
            translate_event(&json!({"event": "start-file"})),
            Some(BackendEvent::Status(PlayerStatus::Buffering))
        );
        assert_eq!(
            translate_event(&json!({"request_id": 7, "error": "success", "data": 83.6})),
            Some(BackendEvent::Position(83))
        );
        assert_eq!(translate_event(&json!({"request_id": 7, "error": "property unavailable"})), None);
        assert_eq!(translate_event(&json!({"event": "idle"})), None);
    }

    // ── Debounce ──────────────────────────────────────────────────────────────

    #[test]
    fn test_debouncer_fires_once_after_delay() {
        let mut d = Debouncer::new(Duration::from_millis(500));
        let t0 = Instant::now();
        assert!(!d.take_due(t0));

        d.arm(t0);
        assert!(!d.take_due(t0 + Duration::from_millis(499)));
        assert!(d.take_due(t0 + Duration::from_millis(500)));
        assert!(!d.take_due(t0 + Duration::from_millis(900)));
    }

    #[test]
    fn test_debouncer_rearm_pushes_deadline_back() {
        let mut d = Debouncer::new(Duration::from_millis(500));
        let t0 = Instant::now();
        d.arm(t0);
        d.arm(t0 + Duration::from_millis(300));
        assert!(!d.take_due(t0 + Duration::from_millis(600)));
        assert!(d.take_due(t0 + Duration::from_millis(800)));
    }

    #[test]
    fn test_debouncer_cancel() {
        let mut d = Debouncer::new(Duration::from_millis(500));
        let t0 = Instant::now();
        d.arm(t0);
        d.cancel();
        assert!(d.deadline().is_none());
        assert!(!d.take_due(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn test_sleep_until_none_never_fires() {
        let mut sleep = tokio_test::task::spawn(sleep_until(None));
        tokio_test::assert_pending!(sleep.poll());
    }

    // ── Catalog payloads ──────────────────────────────────────────────────────

    #[test]
    fn test_song_accepts_loose_scalars() {
        let body = json!({
            "success": true,
            "data": {
                "total": 3,
                "start": 0,
                "results": [
                    {"id": "1", "name": "Rock &amp; Roll", "year": 2019, "duration": "215",
                     "artists": {"primary": [{"id": "a", "name": "Tom &amp; Jerry"}, {"id": "b", "name": "Ann"}]},
                     "album": {"id": 99, "name": "Hits"}},
                    {"id": "2", "name": "Quiet", "year": "2020", "duration": 187.0},
                    {"id": "3", "name": "Nothing", "year": null, "duration": null}
                ]
            }
        });
        let resp: SearchResponse<Song> = serde_json::from_value(body).unwrap();
        let songs = resp.data.results;

        assert_eq!(songs[0].name, "Rock & Roll");
        assert_eq!(songs[0].year.as_deref(), Some("2019"));
        assert_eq!(songs[0].duration, Some(215));
        assert_eq!(songs[0].artist_names(), "Tom & Jerry, Ann");
        assert_eq!(songs[0].album.id.as_deref(), Some("99"));
        assert_eq!(songs[1].year.as_deref(), Some("2020"));
        assert_eq!(songs[1].duration_secs(), 187);
        assert_eq!(songs[2].year, None);
        assert_eq!(songs[2].duration_secs(), 0);
    }

    #[test]
    fn test_album_details_total_duration() {
        let body = json!({
            "id": "al", "name": "Long Player", "year": "2001",
            "songs": [
                {"id": "1", "name": "a", "duration": 1800},
                {"id": "2", "name": "b", "duration": "1920"},
                {"id": "3", "name": "c"}
            ]
        });
        let details: AlbumDetails = serde_json::from_value(body).unwrap();
        assert_eq!(details.album.name, "Long Player");
        assert_eq!(details.total_duration_secs(), 3720);
        assert_eq!(format_total_duration(details.total_duration_secs()), "1 hr 2 min");
    }

    #[test]
    fn test_video_query_includes_artists() {
        let mut s = song("1", 100);
        s.name = "Blue".into();
        assert_eq!(video_query(&s), "Blue official audio");
        s.artists = Artists {
            primary: vec![
                ArtistRef { name: "A".into(), ..Default::default() },
                ArtistRef { name: "B".into(), ..Default::default() },
            ],
        };
        assert_eq!(video_query(&s), "Blue A B official audio");
    }

    #[test]
    fn test_parse_video_id() {
        let found = r#"{"items":[{"id":{"kind":"youtube#video","videoId":"dQw4w9WgXcQ"}}]}"#;
        assert_eq!(parse_video_id(found).unwrap().as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(parse_video_id(r#"{"items":[]}"#).unwrap(), None);
        assert_eq!(parse_video_id("{}").unwrap(), None);
        assert!(parse_video_id("not json").is_err());
    }

    #[test]
    fn test_parse_generated_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Chill\n"}]}}]}"#;
        assert_eq!(parse_generated_text(body).as_deref(), Some("Chill\n"));
        assert_eq!(parse_generated_text(r#"{"candidates":[]}"#), None);
    }

    #[tokio::test]
    async fn test_blank_search_skips_request() {
        let http = build_http_client(&Config::default()).unwrap();
        let catalog = Catalog::new(http, "http://127.0.0.1:9");
        assert!(catalog.search_songs("   ", 20).await.unwrap().is_empty());
        assert!(catalog.search_albums("", 20).await.unwrap().is_empty());
    }

    // ── Search state ──────────────────────────────────────────────────────────

    #[test]
    fn test_search_entries_caps_and_order() {
        let search = SearchState {
            songs: (0..15).map(|i| song(&format!("s{i}"), 10)).collect(),
            albums: (0..12).map(|i| album(&format!("a{i}"))).collect(),
            ..Default::default()
        };
        let entries = search.entries();
        assert_eq!(entries.len(), 18);
        assert!(matches!(entries[0], Entry::Album(a) if a.id == "a0"));
        assert!(matches!(entries[8], Entry::Song(s) if s.id == "s0"));
    }

    #[test]
    fn test_search_filter_limits_entries() {
        let mut search = SearchState {
            songs: vec![song("s", 10)],
            albums: vec![album("a")],
            filter: SearchFilter::Songs,
            ..Default::default()
        };
        assert_eq!(search.entries(), vec![Entry::Song(&search.songs[0])]);
        search.filter = search.filter.cycle();
        assert_eq!(search.filter, SearchFilter::Albums);
        assert_eq!(search.entries().len(), 1);
        assert_eq!(search.filter.cycle(), SearchFilter::All);
    }

    #[test]
    fn test_query_needs_two_chars() {
        let mut search = SearchState { query: " a ".into(), ..Default::default() };
        assert!(!search.query_is_searchable());
        search.query = "ab".into();
        assert!(search.query_is_searchable());
    }

    // ── AppState ──────────────────────────────────────────────────────────────

    #[test]
    fn test_navigate_to_changes_screen() {
        let mut state = AppState::default();
        assert_eq!(state.active_screen, ActiveScreen::Home);
        state.navigate_to(ActiveScreen::Mood);
        assert_eq!(state.active_screen, ActiveScreen::Mood);
        assert_eq!(state.previous_screen, Some(ActiveScreen::Home));
    }

    #[test]
    fn test_navigate_to_same_screen_noop() {
        let mut state = AppState::default();
        state.navigate_to(ActiveScreen::Home);
        assert!(state.previous_screen.is_none());
    }

    #[test]
    fn test_home_entries_selection() {
        let mut state = AppState::default();
        state.home.albums = vec![album("a1"), album("a2")];
        state.player.recommendations = (0..8).map(|i| song(&format!("r{i}"), 10)).collect();
        assert_eq!(state.home_entries().len(), 7);

        state.home.selected = 2;
        assert_eq!(state.selected_song().map(|s| s.id.as_str()), Some("r0"));
        state.home.selected = 1;
        assert!(state.selected_song().is_none());
        assert!(matches!(state.selected_entry(), Some(Entry::Album(a)) if a.id == "a2"));
    }

    #[test]
    fn test_mood_cards_have_no_song_selection() {
        let mut state = AppState::default();
        state.player.recommendations = vec![song("r0", 10)];
        state.navigate_to(ActiveScreen::Mood);
        assert!(state.selected_entry().is_none());
        state.mood.focus = crate::app::state::MoodFocus::Tracks;
        assert_eq!(state.selected_song().map(|s| s.id.as_str()), Some("r0"));
    }

    #[test]
    fn test_input_active_tracks_editing() {
        let mut state = AppState::default();
        assert!(!state.input_active());
        state.mood.is_editing = true;
        assert!(state.input_active());
    }

    #[test]
    fn test_mood_color_theme_defaults_to_primary() {
        let mut state = AppState::default();
        assert_eq!(state.mood.color_theme(), "primary");
        state.mood.current = Some(Mood::Sad.profile());
        assert_eq!(state.mood.color_theme(), "sad");
    }

    #[test]
    fn test_notification_tick_decrements() {
        let mut state = AppState::default();
        state.set_notification(Notification::info("hello"));
        // remaining_ticks=30: 30 ticks to reach 0, then 1 more to clear
        for _ in 0..31 {
            state.tick_notification();
        }
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_error_notification_lasts_longer() {
        let mut state = AppState::default();
        state.set_notification(Notification::error("boom"));
        for _ in 0..31 {
            state.tick_notification();
        }
        assert!(state.notification.as_ref().is_some_and(|n| n.is_error));
    }

    #[test]
    fn test_eq_bars_decay_when_idle() {
        let mut state = AppState::default();
        for _ in 0..20 {
            state.update_eq_bars();
        }
        assert!(state.eq_bars.iter().all(|&b| b == 1));
    }

    #[test]
    fn test_eq_bars_stay_in_range_while_playing() {
        let mut state = AppState::default();
        state.player.apply(PlayerCommand::Play(song("a", 100)));
        for _ in 0..50 {
            state.update_eq_bars();
        }
        assert!(state.eq_bars.iter().all(|&b| (1..=12).contains(&b)));
    }

    #[test]
    fn test_display_title_short_is_unchanged() {
        let mut state = AppState::default();
        state.player.current = Some(Song { name: "Short".into(), ..Default::default() });
        assert_eq!(state.get_display_title(20), "Short");
    }

    #[test]
    fn test_display_title_scrolls() {
        let mut state = AppState::default();
        state.player.current = Some(Song { name: "A very long title indeed".into(), ..Default::default() });
        assert_eq!(state.get_display_title(6), "A very");
        state.ticker_offset = 2;
        assert_eq!(state.get_display_title(6), "very l");
    }

    #[test]
    fn test_truncate_str_respects_width() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 6), "hello…");
        // Wide glyphs take two columns each.
        assert_eq!(truncate_str("日本語の歌", 5), "日本…");
    }

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(greeting(6), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(17), "Good afternoon");
        assert_eq!(greeting(18), "Good evening");
    }

    #[test]
    fn test_format_total_duration() {
        assert_eq!(format_total_duration(0), "0 min");
        assert_eq!(format_total_duration(2520), "42 min");
        assert_eq!(format_total_duration(3900), "1 hr 5 min");
    }

    // ── Key mapping ───────────────────────────────────────────────────────────

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keys_in_normal_mode() {
        assert_eq!(map_key_to_action(key(KeyCode::Char('q')), false), Some(UserAction::Quit));
        assert_eq!(map_key_to_action(key(KeyCode::Char(' ')), false), Some(UserAction::TogglePlay));
        assert_eq!(map_key_to_action(key(KeyCode::Char('3')), false), Some(UserAction::SwitchScreen(3)));
        assert_eq!(map_key_to_action(key(KeyCode::Char('R')), false), Some(UserAction::RandomMood));
        assert_eq!(map_key_to_action(key(KeyCode::Char('z')), false), None);
    }

    #[test]
    fn test_keys_in_input_mode_are_text() {
        assert_eq!(map_key_to_action(key(KeyCode::Char('q')), true), Some(UserAction::Input('q')));
        assert_eq!(map_key_to_action(key(KeyCode::Enter), true), Some(UserAction::InputSubmit));
        assert_eq!(map_key_to_action(key(KeyCode::Esc), true), Some(UserAction::Back));
        assert_eq!(map_key_to_action(key(KeyCode::Up), true), None);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_to_action(ctrl_c, true), Some(UserAction::Quit));
        assert_eq!(map_key_to_action(ctrl_c, false), Some(UserAction::Quit));
    }

    // ── Result lists ──────────────────────────────────────────────────────────

    #[test]
    fn test_unique_by_id_keeps_first_occurrence() {
        let mut dup = song("a", 200);
        dup.name = "Duplicate".into();
        let songs = unique_by_id(vec![song("a", 100), song("b", 100), dup, song("c", 100)]);
        let ids: Vec<&str> = songs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(songs[0].name, "Song a");

        let albums = unique_by_id(vec![album("x"), album("x"), album("y")]);
        assert_eq!(albums.len(), 2);
    }

    // ── App: background results ───────────────────────────────────────────────

    fn test_app() -> App {
        let config = Config { mpv_path: String::new(), ..Config::default() };
        App::new(config).unwrap()
    }

    fn search_results(query: &str, songs: Vec<Song>) -> AppMessage {
        AppMessage::SearchResults {
            query: query.into(),
            filter: SearchFilter::All,
            songs,
            albums: vec![],
        }
    }

    #[tokio::test]
    async fn test_search_results_for_current_query_are_shown() {
        let mut app = test_app();
        app.state.search.query = "abc ".into();
        app.state.search.is_searching = true;
        app.handle_message(search_results("abc", vec![song("s1", 100)]));

        assert!(!app.state.search.is_searching);
        assert_eq!(app.state.search.songs.len(), 1);
        assert_eq!(app.state.search.searched_query.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_stale_search_clears_spinner_for_short_query() {
        let mut app = test_app();
        app.state.search.query = "a".into();
        app.state.search.is_searching = true;
        app.handle_message(search_results("abc", vec![song("s1", 100)]));

        assert!(!app.state.search.is_searching);
        assert!(app.state.search.songs.is_empty());
    }

    #[tokio::test]
    async fn test_stale_search_keeps_spinner_while_newer_query_runs() {
        let mut app = test_app();
        app.state.search.query = "abcd".into();
        app.state.search.is_searching = true;
        app.handle_message(search_results("abc", vec![song("s1", 100)]));

        assert!(app.state.search.is_searching);
        assert!(app.state.search.songs.is_empty());
    }

    #[tokio::test]
    async fn test_mood_results_for_other_mood_are_dropped() {
        let mut app = test_app();
        app.state.mood.current = Some(Mood::Happy.profile());
        app.state.mood.loading_recommendations = true;
        app.state.home.loading_albums = true;

        app.handle_message(AppMessage::Recommendations { mood: Mood::Sad, songs: vec![song("s", 100)] });
        app.handle_message(AppMessage::MoodAlbums { mood: Mood::Sad, albums: vec![album("x")] });
        assert!(app.state.player.recommendations.is_empty());
        assert!(app.state.home.albums.is_empty());
        assert!(app.state.mood.loading_recommendations);

        app.handle_message(AppMessage::Recommendations { mood: Mood::Happy, songs: vec![song("h", 100)] });
        assert_eq!(app.state.player.recommendations.len(), 1);
        assert!(!app.state.mood.loading_recommendations);
    }

    #[tokio::test]
    async fn test_mood_albums_are_capped() {
        let mut app = test_app();
        app.state.mood.current = Some(Mood::Chill.profile());
        let albums: Vec<Album> = (0..12).map(|i| album(&format!("al{i}"))).collect();
        app.handle_message(AppMessage::MoodAlbums { mood: Mood::Chill, albums });

        assert_eq!(app.state.home.albums.len(), MAX_ALBUM_CARDS);
        assert!(!app.state.home.loading_albums);
    }

    #[tokio::test]
    async fn test_mood_failure_shows_generic_message() {
        let mut app = test_app();
        app.state.mood.loading = true;
        app.handle_message(AppMessage::MoodFailed);

        assert!(!app.state.mood.loading);
        assert_eq!(app.state.mood.error.as_deref(), Some(MOOD_ANALYSIS_FAILED));
    }

    #[tokio::test]
    async fn test_stale_album_is_dropped() {
        let mut app = test_app();
        app.state.album.album_id = Some("new".into());
        app.state.album.is_loading = true;

        let details = AlbumDetails { album: album("old"), songs: vec![song("t", 100)] };
        app.handle_message(AppMessage::AlbumLoaded { album_id: "old".into(), details: Some(details) });
        assert!(app.state.album.details.is_none());
        assert!(app.state.album.is_loading);

        let details = AlbumDetails { album: album("new"), songs: vec![] };
        app.handle_message(AppMessage::AlbumLoaded { album_id: "new".into(), details: Some(details) });
        assert!(app.state.album.details.is_some());
        assert!(!app.state.album.is_loading);
    }
}
