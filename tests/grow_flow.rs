//! End-to-end orchestration tests against recording fakes

use std::sync::{Arc, Mutex};
use std::time::Duration;

use volgrow::coordinator::{
    CommandRunner, GrowCoordinator, PeerDirectory, PeerNode, ResizeEnvelope, ResizeTransport,
};
use volgrow::{Error, Result};

/// Shared event log recording the observed order of peer sends and local runs.
#[derive(Clone, Default)]
struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

struct FixedPeers {
    peers: Vec<PeerNode>,
    calls: Arc<Mutex<usize>>,
    fail: bool,
}

impl PeerDirectory for FixedPeers {
    fn list_peers(&self) -> Result<Vec<PeerNode>> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(Error::PeerDiscovery("membership unavailable".into()));
        }
        Ok(self.peers.clone())
    }
}

struct RecordingTransport {
    log: EventLog,
    sends: Arc<Mutex<Vec<(String, String)>>>,
    fail_peer: Option<String>,
    delay: Option<Duration>,
}

impl ResizeTransport for RecordingTransport {
    async fn send(&self, peer: &PeerNode, envelope: &ResizeEnvelope) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let target = peer.to_string();
        self.log.push(format!("send {}", target));
        self.sends
            .lock()
            .unwrap()
            .push((target.clone(), serde_json::to_string(envelope).unwrap()));
        if self.fail_peer.as_deref() == Some(target.as_str()) {
            return Err(Error::Remote {
                peer: target,
                reason: "peer answered with status 500".into(),
            });
        }
        Ok(())
    }
}

struct RecordingRunner {
    log: EventLog,
    runs: Arc<Mutex<Vec<Vec<String>>>>,
}

impl CommandRunner for RecordingRunner {
    fn run(&self, commands: &[String]) -> Result<()> {
        self.log.push("local");
        self.runs.lock().unwrap().push(commands.to_vec());
        Ok(())
    }
}

struct Harness {
    coordinator: Arc<GrowCoordinator<FixedPeers, RecordingTransport, RecordingRunner>>,
    log: EventLog,
    sends: Arc<Mutex<Vec<(String, String)>>>,
    runs: Arc<Mutex<Vec<Vec<String>>>>,
    directory_calls: Arc<Mutex<usize>>,
}

fn peer(address: &str, port: u16) -> PeerNode {
    PeerNode {
        address: address.into(),
        port,
    }
}

fn harness(peers: Vec<PeerNode>) -> Harness {
    harness_with(peers, None, false, None)
}

fn harness_with(
    peers: Vec<PeerNode>,
    fail_peer: Option<&str>,
    fail_directory: bool,
    delay: Option<Duration>,
) -> Harness {
    let log = EventLog::default();
    let sends = Arc::new(Mutex::new(Vec::new()));
    let runs = Arc::new(Mutex::new(Vec::new()));
    let directory_calls = Arc::new(Mutex::new(0));

    let coordinator = Arc::new(GrowCoordinator::new(
        FixedPeers {
            peers,
            calls: directory_calls.clone(),
            fail: fail_directory,
        },
        RecordingTransport {
            log: log.clone(),
            sends: sends.clone(),
            fail_peer: fail_peer.map(|s| s.to_string()),
            delay,
        },
        RecordingRunner {
            log: log.clone(),
            runs: runs.clone(),
        },
        "vg_cluster",
    ));

    Harness {
        coordinator,
        log,
        sends,
        runs,
        directory_calls,
    }
}

#[tokio::test]
async fn test_grows_on_all_peers_then_locally() {
    let h = harness(vec![peer("node2", 7000), peer("node3", 7000)]);

    h.coordinator.grow("myvol", "20G").await.unwrap();

    let sends = h.sends.lock().unwrap().clone();
    assert_eq!(
        sends,
        vec![
            (
                "node2:7000".to_string(),
                r#"{"pvName":"myvol","newSize":"20G"}"#.to_string()
            ),
            (
                "node3:7000".to_string(),
                r#"{"pvName":"myvol","newSize":"20G"}"#.to_string()
            ),
        ]
    );

    let runs = h.runs.lock().unwrap().clone();
    assert_eq!(
        runs,
        vec![vec![
            "lvextend -L 20G /dev/vg_cluster/lv_myvol".to_string(),
            "xfs_growfs /dev/vg_cluster/lv_myvol".to_string(),
        ]]
    );

    // All peers are contacted before the local mutation, never after.
    assert_eq!(
        h.log.entries(),
        vec!["send node2:7000", "send node3:7000", "local"]
    );
}

#[tokio::test]
async fn test_invalid_size_contacts_nothing() {
    for size in ["", "20X", "abcG", "0G"] {
        let h = harness(vec![peer("node2", 7000)]);
        let err = h.coordinator.grow("myvol", size).await.unwrap_err();
        assert!(matches!(err, Error::Input(_)), "size {:?}: {:?}", size, err);
        assert_eq!(*h.directory_calls.lock().unwrap(), 0);
        assert!(h.sends.lock().unwrap().is_empty());
        assert!(h.runs.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_empty_volume_name_rejected() {
    let h = harness(vec![peer("node2", 7000)]);
    let err = h.coordinator.grow("", "20G").await.unwrap_err();
    assert!(matches!(err, Error::Input(_)));
    assert_eq!(*h.directory_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_shell_metacharacters_in_volume_name_rejected() {
    let h = harness(vec![]);
    let err = h.coordinator.grow("my;vol", "20G").await.unwrap_err();
    assert!(matches!(err, Error::Input(_)));
    assert!(h.runs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_peer_failure_stops_fanout_and_local_mutation() {
    let h = harness_with(
        vec![peer("node2", 7000), peer("node3", 7000), peer("node4", 7000)],
        Some("node3:7000"),
        false,
        None,
    );

    let err = h.coordinator.grow("myvol", "20G").await.unwrap_err();
    assert!(matches!(err, Error::Remote { .. }));

    // node2 grown, node3 attempted, node4 and the local sequence never reached.
    let targets: Vec<String> = h
        .sends
        .lock()
        .unwrap()
        .iter()
        .map(|(t, _)| t.clone())
        .collect();
    assert_eq!(targets, vec!["node2:7000", "node3:7000"]);
    assert!(h.runs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_last_peer_failure_never_invokes_runner() {
    let h = harness_with(
        vec![peer("node2", 7000), peer("node3", 7000)],
        Some("node3:7000"),
        false,
        None,
    );

    let err = h.coordinator.grow("myvol", "20G").await.unwrap_err();
    assert!(matches!(err, Error::Remote { .. }));
    assert_eq!(h.sends.lock().unwrap().len(), 2);
    assert!(h.runs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_peer_discovery_failure_aborts_before_any_mutation() {
    let h = harness_with(vec![peer("node2", 7000)], None, true, None);

    let err = h.coordinator.grow("myvol", "20G").await.unwrap_err();
    assert!(matches!(err, Error::PeerDiscovery(_)));
    assert!(h.sends.lock().unwrap().is_empty());
    assert!(h.runs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_zero_peers_grows_only_locally() {
    let h = harness(vec![]);

    h.coordinator.grow("myvol", "20G").await.unwrap();

    assert!(h.sends.lock().unwrap().is_empty());
    assert_eq!(h.runs.lock().unwrap().len(), 1);
    assert_eq!(h.log.entries(), vec!["local"]);
}

#[tokio::test]
async fn test_regrow_issues_commands_again() {
    // Re-invoking a grow is passed through to the storage tooling unchanged;
    // the coordinator performs no target-state check.
    let h = harness(vec![peer("node2", 7000)]);

    h.coordinator.grow("myvol", "20G").await.unwrap();
    h.coordinator.grow("myvol", "20G").await.unwrap();

    let runs = h.runs.lock().unwrap().clone();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0], runs[1]);
    assert_eq!(h.sends.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_grow_local_never_contacts_peers() {
    let h = harness(vec![peer("node2", 7000), peer("node3", 7000)]);

    h.coordinator.grow_local("myvol", "20G").await.unwrap();

    assert_eq!(*h.directory_calls.lock().unwrap(), 0);
    assert!(h.sends.lock().unwrap().is_empty());
    assert_eq!(
        h.runs.lock().unwrap().clone(),
        vec![vec![
            "lvextend -L 20G /dev/vg_cluster/lv_myvol".to_string(),
            "xfs_growfs /dev/vg_cluster/lv_myvol".to_string(),
        ]]
    );
}

#[tokio::test]
async fn test_grow_local_still_validates_input() {
    let h = harness(vec![]);
    assert!(matches!(
        h.coordinator.grow_local("myvol", "20X").await.unwrap_err(),
        Error::Input(_)
    ));
    assert!(h.runs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_grows_of_same_volume_serialize() {
    let h = harness_with(
        vec![peer("node2", 7000), peer("node3", 7000)],
        None,
        false,
        Some(Duration::from_millis(10)),
    );

    let (a, b) = tokio::join!(
        h.coordinator.grow("myvol", "20G"),
        h.coordinator.grow("myvol", "30G"),
    );
    a.unwrap();
    b.unwrap();

    // One call's fan-out/local window never interleaves with the other's.
    let entries = h.log.entries();
    assert_eq!(entries.len(), 6);
    assert_eq!(
        &entries[0..3],
        &["send node2:7000", "send node3:7000", "local"]
    );
    assert_eq!(
        &entries[3..6],
        &["send node2:7000", "send node3:7000", "local"]
    );
}
