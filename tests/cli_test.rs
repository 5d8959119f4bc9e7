/// Binary-level tests: argument handling and single-pass mode
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn replicr() -> Command {
	let mut cmd = Command::new(env!("CARGO_BIN_EXE_replicr"));
	for var in ["REPLICR_SOURCE", "REPLICR_DESTINATION", "REPLICR_INTERVAL", "REPLICR_LOG"] {
		cmd.env_remove(var);
	}
	cmd
}

#[test]
fn test_missing_arguments_is_usage_error() {
	let tmp = TempDir::new().unwrap();
	let output = replicr().args(["-s", "src", "-i", "5"]).current_dir(tmp.path()).output().unwrap();

	assert!(!output.status.success());
	assert_eq!(output.status.code(), Some(2));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("destination folder is required"), "{}", stderr);
	assert!(fs::read_dir(tmp.path()).unwrap().next().is_none(), "no pass may run");
}

#[test]
fn test_non_numeric_interval_rejected() {
	let output = replicr().args(["-s", "a", "-d", "b", "-i", "soon", "-l", "x.log"]).output().unwrap();
	assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_once_mirrors_and_logs() {
	let tmp = TempDir::new().unwrap();
	let src = tmp.path().join("src");
	fs::create_dir_all(src.join("sub")).unwrap();
	fs::write(src.join("sub/a.txt"), "hello").unwrap();
	let dst = tmp.path().join("dst");
	let log = tmp.path().join("sync.log");

	let output = replicr()
		.arg("--source_folder")
		.arg(&src)
		.arg("--destination_folder")
		.arg(&dst)
		.args(["--interval", "60", "--once"])
		.arg("--log")
		.arg(&log)
		.output()
		.unwrap();

	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
	assert_eq!(fs::read_to_string(dst.join("sub/a.txt")).unwrap(), "hello");

	let content = fs::read_to_string(&log).unwrap();
	assert!(content.contains("the following updates have been made:"));
	assert!(content.contains("copied to"));
	assert!(content.contains("Info: Created log at"));

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("copied to"));
}

#[test]
fn test_once_with_missing_source_fails() {
	let tmp = TempDir::new().unwrap();
	let log = tmp.path().join("sync.log");

	let output = replicr()
		.arg("-s")
		.arg(tmp.path().join("nope"))
		.arg("-d")
		.arg(tmp.path().join("dst"))
		.args(["-i", "1", "--once", "--no-echo", "-l"])
		.arg(&log)
		.output()
		.unwrap();

	assert_eq!(output.status.code(), Some(1));
	let content = fs::read_to_string(&log).unwrap();
	assert!(content.contains("Error: Failed to synchronize"));
	assert!(!String::from_utf8_lossy(&output.stdout).contains("Failed to synchronize"));
}

#[test]
fn test_config_file_supplies_values() {
	let tmp = TempDir::new().unwrap();
	let src = tmp.path().join("src");
	fs::create_dir(&src).unwrap();
	fs::write(src.join("f"), "f").unwrap();
	let config = tmp.path().join("replicr.toml");
	fs::write(
		&config,
		format!(
			"source = {:?}\ndestination = {:?}\ninterval = 30\nlogFile = {:?}\nechoConsole = false\n",
			src,
			tmp.path().join("dst"),
			tmp.path().join("sync.log")
		),
	)
	.unwrap();

	let output = replicr().arg("-c").arg(&config).arg("--once").output().unwrap();

	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
	assert!(tmp.path().join("dst/f").exists());
}

#[cfg(unix)]
#[test]
fn test_interrupt_exits_cleanly() {
	use std::thread;
	use std::time::Duration;

	let tmp = TempDir::new().unwrap();
	fs::create_dir(tmp.path().join("src")).unwrap();

	let child = replicr()
		.arg("-s")
		.arg(tmp.path().join("src"))
		.arg("-d")
		.arg(tmp.path().join("dst"))
		.args(["-i", "3600", "-l"])
		.arg(tmp.path().join("sync.log"))
		.stdout(std::process::Stdio::piped())
		.spawn()
		.unwrap();

	// Wait for the first pass to be journaled
	for _ in 0..100 {
		if tmp.path().join("sync.log").exists() {
			break;
		}
		thread::sleep(Duration::from_millis(50));
	}
	thread::sleep(Duration::from_millis(200));

	let status = Command::new("kill").args(["-INT", &child.id().to_string()]).status().unwrap();
	assert!(status.success());

	let output = child.wait_with_output().unwrap();
	assert_eq!(output.status.code(), Some(0));
	assert!(String::from_utf8_lossy(&output.stdout).contains("Mirroring terminated by user."));
}
