#![feature(test)]

extern crate test;

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use test::Bencher;
use textbook_rsa::{is_probable_prime, pow_mod, BigUint, RandPrime};

const NUM: &str = "203956878356401977405765866929034577280193993314348263094772646453283062722701277632936616063144088173312372882677123879538709400158306567338328279154499698366071906766440037074217117805690872792848149112022286332144876183376326512083574821647933992961249917319836219304274280243803104015000563790123";

macro_rules! bench_probable_prime {
    ($name:ident, $n:expr) => {
        #[bench]
        fn $name(b: &mut Bencher) {
            let x = test::black_box(BigUint::parse_bytes(NUM.as_bytes(), 10).unwrap());
            let mut rng = ChaCha8Rng::from_seed([42; 32]);

            b.iter(|| {
                let res = is_probable_prime(&mut rng, &x, $n);
                test::black_box(res);
            });
        }
    };
}

bench_probable_prime!(probable_prime_0, 0);
bench_probable_prime!(probable_prime_1, 1);
bench_probable_prime!(probable_prime_5, 5);
bench_probable_prime!(probable_prime_10, 10);
bench_probable_prime!(probable_prime_20, 20);

macro_rules! bench_gen_prime {
    ($name:ident, $bits:expr) => {
        #[bench]
        fn $name(b: &mut Bencher) {
            let mut rng = ChaCha8Rng::from_seed([42; 32]);

            b.iter(|| {
                let res = rng.gen_prime($bits, 20).unwrap();
                test::black_box(res);
            });
        }
    };
}

bench_gen_prime!(gen_prime_256, 256);
bench_gen_prime!(gen_prime_512, 512);

#[bench]
fn bench_pow_mod(b: &mut Bencher) {
    let n = BigUint::parse_bytes(NUM.as_bytes(), 10).unwrap();
    let base = &n >> 7usize;
    let exp = &n - 1u32;

    b.iter(|| {
        let res = pow_mod(&base, &exp, &n);
        test::black_box(res);
    });
}
