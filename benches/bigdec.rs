// Copyright Materialize, Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{thread_rng, Rng};

use bigdec::{Context, Decimal};

fn bench_decode(d: Decimal, b: &mut Bencher) {
    b.iter_with_setup(|| d.clone(), |d| (d.exponent(), d.digits()))
}

pub fn bench_ops(c: &mut Criterion) {
    let mut rng = thread_rng();
    let d = Decimal::from(rng.gen::<i64>());
    c.bench_function("decode", |b| bench_decode(d.clone(), b));

    c.bench_function("parse", |b| {
        b.iter(|| "123456.789".parse::<Decimal>().unwrap())
    });

    let mut cx = Context::default();
    let x = cx.parse("123456.789").unwrap();
    let y = cx.parse("0.003").unwrap();

    c.bench_function("add", |b| {
        b.iter_with_setup(
            || (Context::default(), x.clone(), y.clone()),
            |(mut cx, mut x, y)| {
                cx.add(&mut x, &y);
                x
            },
        )
    });

    c.bench_function("div", |b| {
        b.iter_with_setup(
            || (Context::default(), x.clone(), y.clone()),
            |(mut cx, mut x, y)| {
                cx.div(&mut x, &y);
                x
            },
        )
    });
}

criterion_group!(benches, bench_ops);
criterion_main!(benches);
