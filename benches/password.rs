//! Argon2 密码哈希与登录校验基准测试

use criterion::{Criterion, criterion_group, criterion_main};
use tinyapp::storage::{CredentialPolicy, UserDirectory};
use tinyapp::utils::password::{hash_password, plaintext_matches, verify_password};

fn bench_hash_password(c: &mut Criterion) {
    c.bench_function("password/hash", |b| {
        b.iter(|| {
            let _ = hash_password("purple-monkey-dinosaur");
        });
    });
}

fn bench_verify_password(c: &mut Criterion) {
    let password = "dishwasher-funk";
    let hash = hash_password(password).expect("hash should succeed");

    let mut group = c.benchmark_group("password/verify");

    group.bench_function("correct", |b| {
        b.iter(|| {
            let result = verify_password(password, &hash).expect("verify should succeed");
            assert!(result);
        });
    });

    group.bench_function("wrong", |b| {
        b.iter(|| {
            let result = verify_password("wrong_password", &hash).expect("verify should succeed");
            assert!(!result);
        });
    });

    group.finish();
}

fn bench_plaintext_matches(c: &mut Criterion) {
    c.bench_function("password/plaintext_matches", |b| {
        b.iter(|| {
            assert!(plaintext_matches("dishwasher-funk", "dishwasher-funk"));
        });
    });
}

/// 对比两种凭证策略下一次完整登录的开销
fn bench_directory_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("password/directory_verify");
    group.sample_size(20);

    for (name, policy) in [
        ("hashed", CredentialPolicy::Hashed),
        ("plain", CredentialPolicy::Plain),
    ] {
        let users = UserDirectory::new(policy, 8);
        users
            .create("user@example.com", "purple-monkey-dinosaur")
            .expect("create should succeed");

        group.bench_function(name, |b| {
            b.iter(|| {
                assert!(
                    users
                        .verify("user@example.com", "purple-monkey-dinosaur")
                        .is_some()
                );
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_hash_password,
    bench_verify_password,
    bench_plaintext_matches,
    bench_directory_verify
);
criterion_main!(benches);
