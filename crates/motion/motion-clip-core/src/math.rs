//! Quaternion and roll/pitch/yaw helpers.
//! Quaternions are stored as `[x, y, z, w]`, vectors as `[x, y, z]`.
//! Euler convention: roll about X, pitch about Y, yaw about Z, composed as
//! `q = yaw * pitch * roll` (intrinsic Z-Y-X).

pub type Quat = [f32; 4];
pub type Vec3 = [f32; 3];

pub const QUAT_IDENTITY: Quat = [0.0, 0.0, 0.0, 1.0];

/// Normalize a quaternion. A zero quaternion maps to identity.
pub fn normalize_quat(q: Quat) -> Quat {
    let mag = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
    if mag == 0.0 {
        QUAT_IDENTITY
    } else {
        [q[0] / mag, q[1] / mag, q[2] / mag, q[3] / mag]
    }
}

/// Hamilton product `a * b`.
pub fn quat_mul(a: Quat, b: Quat) -> Quat {
    let [ax, ay, az, aw] = a;
    let [bx, by, bz, bw] = b;
    [
        aw * bx + ax * bw + ay * bz - az * by,
        aw * by - ax * bz + ay * bw + az * bx,
        aw * bz + ax * by - ay * bx + az * bw,
        aw * bw - ax * bx - ay * by - az * bz,
    ]
}

#[inline]
pub fn quat_conjugate(q: Quat) -> Quat {
    [-q[0], -q[1], -q[2], q[3]]
}

#[inline]
pub fn quat_dot(a: Quat, b: Quat) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

/// Euclidean distance between two quaternions, taking the shorter of `a - b`
/// and `a + b` so that `q` and `-q` (the same rotation) compare as equal.
/// Identical inputs yield exactly `0.0`.
pub fn quat_distance(a: Quat, b: Quat) -> f32 {
    let mut diff = 0.0f32;
    let mut sum = 0.0f32;
    for i in 0..4 {
        let d = a[i] - b[i];
        let s = a[i] + b[i];
        diff += d * d;
        sum += s * s;
    }
    diff.min(sum).sqrt()
}

/// Build a quaternion from roll (X), pitch (Y) and yaw (Z), in radians.
pub fn quat_from_rpy(roll: f32, pitch: f32, yaw: f32) -> Quat {
    let (sr, cr) = (roll * 0.5).sin_cos();
    let (sp, cp) = (pitch * 0.5).sin_cos();
    let (sy, cy) = (yaw * 0.5).sin_cos();
    [
        sr * cp * cy - cr * sp * sy,
        cr * sp * cy + sr * cp * sy,
        cr * cp * sy - sr * sp * cy,
        cr * cp * cy + sr * sp * sy,
    ]
}

/// Decompose a quaternion into `(roll, pitch, yaw)` in radians.
/// Pitch is clamped to ±π/2 at the gimbal-lock singularity.
pub fn quat_to_rpy(q: Quat) -> (f32, f32, f32) {
    let [x, y, z, w] = normalize_quat(q);

    let sinr_cosp = 2.0 * (w * x + y * z);
    let cosr_cosp = 1.0 - 2.0 * (x * x + y * y);
    let roll = sinr_cosp.atan2(cosr_cosp);

    let sinp = 2.0 * (w * y - z * x);
    let pitch = if sinp.abs() >= 1.0 {
        std::f32::consts::FRAC_PI_2.copysign(sinp)
    } else {
        sinp.asin()
    };

    let siny_cosp = 2.0 * (w * z + x * y);
    let cosy_cosp = 1.0 - 2.0 * (y * y + z * z);
    let yaw = siny_cosp.atan2(cosy_cosp);

    (roll, pitch, yaw)
}

#[inline]
pub fn vec3_add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn vec3_sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}
