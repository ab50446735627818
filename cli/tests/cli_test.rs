use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;

const ARN: &str =
    "arn:aws:iam::123456789012:oidc-provider/oidc.eks.eu-west-1.amazonaws.com/id/ABCDEF123";

fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("samples")
        .join("tenants")
}

fn tenantsys() -> Command {
    let mut cmd = Command::cargo_bin("tenantsys").unwrap();
    cmd.env("RUST_LOG", "off")
        .arg("--tenants-dir")
        .arg(samples_dir());
    cmd
}

#[test]
fn list_table() {
    let output = tenantsys().arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("STACK"));
    assert!(stdout.contains("tenant-acme-stack"));
    assert!(stdout.contains("tenant-globex-stack"));
    assert!(stdout.contains("Rejected tenant files:"));
    assert!(stdout.contains("initech.yaml"));
}

#[test]
fn list_json() {
    let output = tenantsys().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        list["adminClusterParameters"]["clusterName"],
        "/eks/admin-cluster/name"
    );
    let tenants = list["tenants"].as_array().unwrap();
    assert_eq!(tenants.len(), 2);
    assert_eq!(tenants[0]["name"], "acme");
    assert_eq!(tenants[0]["version"], "v1.25.2");
    assert_eq!(tenants[1]["dns_service"], "10.96.0.10");
    let failures = list["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert!(failures[0]["path"].as_str().unwrap().ends_with("initech.yaml"));
}

#[test]
fn missing_tenants_dir() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("tenantsys").unwrap();
    cmd.env("RUST_LOG", "off")
        .arg("--tenants-dir")
        .arg(tempdir.path().join("nope"))
        .arg("list");
    cmd.assert().failure().code(1);
}

#[test]
fn render_stdout() {
    let output = tenantsys().arg("render").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let kinds: Vec<String> = stdout
        .split("---")
        .map(str::trim)
        .filter(|doc| !doc.is_empty())
        .map(|doc| {
            let value: serde_yaml::Value = serde_yaml::from_str(doc).unwrap();
            value["kind"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "Namespace",
            "TenantControlPlane",
            "Namespace",
            "TenantControlPlane"
        ]
    );
}

#[test]
fn render_strict() {
    let output = tenantsys().args(["render", "--strict"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("initech.yaml"));
}

#[test]
fn render_output_dir() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let out = tempdir.path().join("rendered");
    tenantsys()
        .arg("render")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    let acme = fs::read_to_string(out.join("acme.yaml")).unwrap();
    assert!(acme.contains("namespace: tenant-acme"));
    assert!(out.join("globex.yaml").is_file());
    assert!(!out.join("initech.yaml").exists());
}

#[test]
fn oidc_id() {
    tenantsys()
        .args(["oidc-id", ARN])
        .assert()
        .success()
        .stdout("oidc.eks.eu-west-1.amazonaws.com/id/ABCDEF123\n");
    tenantsys()
        .args(["oidc-id", "arn:aws:iam::123:oidc-provider/x"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn trust_policy() {
    let output = tenantsys()
        .args(["trust-policy", ARN, "--service-account", "builder"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let policy: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let statement = &policy["Statement"][0];
    assert_eq!(statement["Principal"]["Federated"], ARN);
    assert_eq!(
        statement["Condition"]["StringEquals"]["oidc.eks.eu-west-1.amazonaws.com/id/ABCDEF123:sub"],
        "system:serviceaccount:kube-system:builder"
    );
}

#[test]
fn render_strict_rejects_duplicate_names() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let tenants = tempdir.path().join("tenants");
    let out = tempdir.path().join("rendered");
    fs::create_dir(&tenants).unwrap();
    for (file, namespace) in [("a.yaml", "team-a"), ("b.yaml", "team-b")] {
        fs::write(
            tenants.join(file),
            format!(
                "name: acme\nnamespace: {}\ndomain: clusters.example.com\nversion: v1.25.2\n\
                port: 6443\nproxy_port: 8132\n",
                namespace
            ),
        )
        .unwrap();
    }
    let mut cmd = Command::cargo_bin("tenantsys").unwrap();
    let output = cmd
        .env("RUST_LOG", "off")
        .arg("--tenants-dir")
        .arg(&tenants)
        .arg("render")
        .arg("--strict")
        .arg("--output")
        .arg(&out)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("Tenant 'acme' is already defined"));
    assert!(!out.exists());

    let mut cmd = Command::cargo_bin("tenantsys").unwrap();
    cmd.env("RUST_LOG", "off")
        .arg("--tenants-dir")
        .arg(&tenants)
        .arg("render")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    let acme = fs::read_to_string(out.join("acme.yaml")).unwrap();
    assert!(acme.contains("team-a"));
    assert!(!acme.contains("team-b"));
}
